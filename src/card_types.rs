use heapless::String;
use ufmt::{uDisplay, uWrite};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn hex_pair(byte: u8) -> [u8; 2] {
    [
        HEX_DIGITS[usize::from(byte >> 4)],
        HEX_DIGITS[usize::from(byte & 0x0F)],
    ]
}

/// ATQA returned by a REQA/WUPA request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagType(pub [u8; 2]);

/// Cascade level 1 UID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uid(pub [u8; 4]);

impl Uid {
    /// Block check character: XOR of the four UID bytes.
    pub fn bcc(&self) -> u8 {
        self.0.iter().fold(0, |acc, byte| acc ^ byte)
    }

    /// Lowercase hex, eight characters, no separators.
    pub fn to_hex(&self) -> String<8> {
        let mut out = String::new();
        for byte in self.0 {
            for digit in hex_pair(byte) {
                out.push(char::from(digit)).ok();
            }
        }
        out
    }
}

impl uDisplay for Uid {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.to_hex().as_str())
    }
}

/// Formats a byte as two lowercase hex digits.
pub struct HexByte(pub u8);

impl uDisplay for HexByte {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let [high, low] = hex_pair(self.0);
        f.write_char(char::from(high))?;
        f.write_char(char::from(low))
    }
}
