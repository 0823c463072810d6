// src/cs_pin_wrapper.rs

use embedded_hal::digital::OutputPin;

use crate::errors::RFIDError;

/// Active-low chip select that frames one register access at a time.
pub struct CsPinWrapper<CS> {
    cs: CS,
}

impl<CS> CsPinWrapper<CS>
where
    CS: OutputPin,
{
    pub fn new(cs: CS) -> Self {
        CsPinWrapper { cs }
    }

    /// Drives the line to its idle (high) level.
    pub fn release(&mut self) -> Result<(), RFIDError> {
        self.cs.set_high().map_err(|_| RFIDError::CommunicationError)
    }

    /// Runs `frame` with the chip selected. The line is released even when the
    /// transfer fails.
    pub fn transaction<T, E>(
        &mut self,
        frame: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, RFIDError> {
        self.cs.set_low().map_err(|_| RFIDError::CommunicationError)?;
        let result = frame();
        self.release()?;
        result.map_err(|_| RFIDError::CommunicationError)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::vec;
    use std::vec::Vec;

    #[derive(Default)]
    struct Line {
        levels: Vec<bool>,
        stuck: bool,
    }

    impl ErrorType for Line {
        type Error = ErrorKind;
    }

    impl OutputPin for Line {
        fn set_low(&mut self) -> Result<(), ErrorKind> {
            if self.stuck {
                return Err(ErrorKind::Other);
            }
            self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), ErrorKind> {
            self.levels.push(true);
            Ok(())
        }
    }

    #[test]
    fn transaction_selects_around_the_frame() {
        let mut cs = CsPinWrapper::new(Line::default());
        assert_eq!(cs.transaction(|| Ok::<_, ()>(7u8)), Ok(7));
        assert_eq!(cs.cs.levels, vec![false, true]);
    }

    #[test]
    fn failed_frame_still_releases() {
        let mut cs = CsPinWrapper::new(Line::default());
        let result: Result<(), RFIDError> = cs.transaction(|| Err(()));
        assert_eq!(result, Err(RFIDError::CommunicationError));
        assert_eq!(cs.cs.levels, vec![false, true]);
    }

    #[test]
    fn select_failure_never_runs_the_frame() {
        let mut cs = CsPinWrapper::new(Line {
            stuck: true,
            ..Line::default()
        });
        let mut ran = false;
        let result = cs.transaction(|| {
            ran = true;
            Ok::<_, ()>(())
        });
        assert_eq!(result, Err(RFIDError::CommunicationError));
        assert!(!ran);
        assert!(cs.cs.levels.is_empty());
    }
}
