use core::fmt::{Debug, Formatter, Result};
use ufmt::{uDebug, uWrite};

/// Failure outcome of a reader operation.
///
/// `NoTag` and `Error` are the chip's own coarse statuses; callers poll again.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum RFIDError {
    /// The chip timer expired before a card answered.
    NoTag,
    /// Bad checksum, wrong length, chip error bits or an exhausted poll budget.
    Error,
    /// The SPI bus or a control line failed on our side.
    CommunicationError,
}

impl Debug for RFIDError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            RFIDError::NoTag => write!(f, "NoTag"),
            RFIDError::Error => write!(f, "Error"),
            RFIDError::CommunicationError => write!(f, "CommunicationError"),
        }
    }
}

// Implementing uDebug for RFIDError
impl uDebug for RFIDError {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<W>) -> core::result::Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            RFIDError::NoTag => f.write_str("NoTag"),
            RFIDError::Error => f.write_str("Error"),
            RFIDError::CommunicationError => f.write_str("CommunicationError"),
        }
    }
}
