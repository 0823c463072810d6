use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use heapless::Vec;
use ufmt::uWrite;

use crate::card_types::{HexByte, TagType, Uid};
use crate::commands::*;
use crate::cs_pin_wrapper::CsPinWrapper;
use crate::errors::RFIDError;
use crate::presence::TagReader;
use crate::registers::*;

/// How many times `COMM_IRQ_REG` is read while waiting for a command to finish.
///
/// This is an iteration count, not a duration. Each iteration is one register read,
/// which is two bytes on the bus plus the chip-select edges. The wall-clock bound
/// therefore scales with the SPI clock: at 1 MHz it is at least 2000 * 16 us = 32 ms,
/// about twice the 15 ms chip timer that `init` programs. An interrupt seen on
/// the last of the 2000 reads still completes the command.
pub const POLL_BUDGET: u16 = 2000;

/// Most bytes drained from the FIFO after a transceive.
pub const MAX_RECEIVE_BYTES: usize = 16;

const ATQA_BITS: u16 = 16;

/// Bytes and bit count collected by a transceive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    pub data: Vec<u8, MAX_RECEIVE_BYTES>,
    /// Valid bits, the last byte may be partial.
    pub bits: u16,
}

pub struct RfidRc522<SPI, CS, RST> {
    spi: SPI,
    cs: CsPinWrapper<CS>,
    rst: RST,
}

impl<SPI, CS, RST> RfidRc522<SPI, CS, RST>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, cs: CS, rst: RST) -> Self {
        RfidRc522 {
            spi,
            cs: CsPinWrapper::new(cs),
            rst,
        }
    }

    /// Brings the chip out of reset, programs the timer and modulation, and
    /// switches the antenna on.
    pub fn init<W: uWrite>(&mut self, serial: &mut W) -> Result<(), RFIDError> {
        self.cs.release()?;
        self.rst
            .set_high()
            .map_err(|_| RFIDError::CommunicationError)?;

        self.reset()?;

        // TAuto=1, prescaler 0xD3E: f_timer = 13.56 MHz / (2 * 3390 + 1) ~= 2 kHz
        self.write_register(T_MODE_REG, 0x8D)?;
        self.write_register(T_PRESCALER_REG, 0x3E)?;
        // 30 ticks ~= 15 ms before TimerIRq reports that no card answered
        self.write_register(T_RELOAD_REG_L, 30)?;
        self.write_register(T_RELOAD_REG_H, 0)?;
        self.write_register(TX_ASK_REG, 0x40)?; // 100% ASK
        self.write_register(MODE_REG, 0x3D)?; // CRC preset to 0x6363

        let version = self.version()?;
        ufmt::uwriteln!(serial, "RFID-RC522 version: 0x{}", HexByte(version)).ok();

        if self.antenna_on()? {
            ufmt::uwriteln!(serial, "Antenna enabled").ok();
        }
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), RFIDError> {
        self.write_register(COMMAND_REG, PCD_RESETPHASE)
    }

    pub fn version(&mut self) -> Result<u8, RFIDError> {
        self.read_register(VERSION_REG)
    }

    /// Sets both antenna driver bits unless they are already set. Returns whether
    /// the register was written.
    pub fn antenna_on(&mut self) -> Result<bool, RFIDError> {
        let current = self.read_register(TX_CONTROL_REG)?;
        if current & TX_RF_EN == TX_RF_EN {
            return Ok(false);
        }
        self.write_register(TX_CONTROL_REG, current | TX_RF_EN)?;
        Ok(true)
    }

    pub fn antenna_off(&mut self) -> Result<(), RFIDError> {
        self.clear_bits(TX_CONTROL_REG, TX_RF_EN)
    }

    /// Sends REQA/WUPA and expects a 16-bit ATQA.
    ///
    /// Any answer that is not exactly 16 bits, including no answer at all, is
    /// `RFIDError::Error`.
    pub fn request(&mut self, mode: u8) -> Result<TagType, RFIDError> {
        self.write_register(BIT_FRAMING_REG, SHORT_FRAME)?;

        match self.transceive(PCD_TRANSCEIVE, &[mode]) {
            Ok(received) => match (received.bits, received.data.as_slice()) {
                (ATQA_BITS, &[low, high]) => Ok(TagType([low, high])),
                _ => Err(RFIDError::Error),
            },
            Err(RFIDError::CommunicationError) => Err(RFIDError::CommunicationError),
            Err(_) => Err(RFIDError::Error),
        }
    }

    /// Cascade level 1 anticollision. The fifth byte of the answer must be the
    /// XOR of the four UID bytes.
    pub fn anticoll(&mut self) -> Result<Uid, RFIDError> {
        self.write_register(BIT_FRAMING_REG, 0x00)?;

        let received = self.transceive(PCD_TRANSCEIVE, &[PICC_ANTICOLL, ANTICOLL_NVB])?;
        match received.data.as_slice() {
            &[a, b, c, d, bcc] => {
                let uid = Uid([a, b, c, d]);
                if uid.bcc() == bcc {
                    Ok(uid)
                } else {
                    Err(RFIDError::Error)
                }
            }
            _ => Err(RFIDError::Error),
        }
    }

    fn transceive(&mut self, command: u8, send: &[u8]) -> Result<Received, RFIDError> {
        let (irq_en, wait_irq) = match command {
            PCD_TRANSCEIVE => (TRANSCEIVE_IRQ_EN, RX_IRQ | IDLE_IRQ),
            _ => (0x00, 0x00),
        };

        self.write_register(COM_IEN_REG, irq_en | IRQ_INV)?;
        self.clear_bits(COMM_IRQ_REG, SET1)?; // Clear all interrupt requests
        self.set_bits(FIFO_LEVEL_REG, FLUSH_BUFFER)?;
        self.write_register(COMMAND_REG, PCD_IDLE)?;

        for &byte in send {
            self.write_register(FIFO_DATA_REG, byte)?;
        }
        self.write_register(COMMAND_REG, command)?;
        if command == PCD_TRANSCEIVE {
            self.set_bits(BIT_FRAMING_REG, START_SEND)?;
        }

        let irq = self.wait_for_irq(wait_irq)?;
        self.clear_bits(BIT_FRAMING_REG, START_SEND)?;

        // Budget exhausted: whatever sits in the FIFO is discarded
        let Some(irq) = irq else {
            return Err(RFIDError::Error);
        };

        if self.read_register(ERROR_REG)? & ERROR_MASK != 0 {
            return Err(RFIDError::Error);
        }
        if irq & irq_en & TIMER_IRQ != 0 {
            return Err(RFIDError::NoTag);
        }

        let mut received = Received {
            data: Vec::new(),
            bits: 0,
        };
        if command != PCD_TRANSCEIVE {
            return Ok(received);
        }

        let level = self.read_register(FIFO_LEVEL_REG)?;
        let last_bits = self.read_register(CONTROL_REG)? & RX_LAST_BITS;
        received.bits = if last_bits != 0 {
            u16::from(level).saturating_sub(1) * 8 + u16::from(last_bits)
        } else {
            u16::from(level) * 8
        };

        // A level of 0 still holds one byte
        let count = usize::from(level).clamp(1, MAX_RECEIVE_BYTES);
        for _ in 0..count {
            let byte = self.read_register(FIFO_DATA_REG)?;
            received.data.push(byte).map_err(|_| RFIDError::Error)?;
        }
        Ok(received)
    }

    fn wait_for_irq(&mut self, wait_irq: u8) -> Result<Option<u8>, RFIDError> {
        for _ in 0..POLL_BUDGET {
            let irq = self.read_register(COMM_IRQ_REG)?;
            if irq & (TIMER_IRQ | wait_irq) != 0 {
                return Ok(Some(irq));
            }
        }
        Ok(None)
    }

    fn set_bits(&mut self, reg: u8, mask: u8) -> Result<(), RFIDError> {
        let current = self.read_register(reg)?;
        self.write_register(reg, current | mask)
    }

    fn clear_bits(&mut self, reg: u8, mask: u8) -> Result<(), RFIDError> {
        let current = self.read_register(reg)?;
        self.write_register(reg, current & !mask)
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), RFIDError> {
        let spi = &mut self.spi;
        self.cs.transaction(|| -> Result<(), SPI::Error> {
            spi.write(&[write_address(reg)])?;
            spi.write(&[value])?;
            spi.flush()
        })
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, RFIDError> {
        let spi = &mut self.spi;
        self.cs.transaction(|| -> Result<u8, SPI::Error> {
            let mut value = [0u8];
            spi.write(&[read_address(reg)])?;
            spi.read(&mut value)?;
            spi.flush()?;
            Ok(value[0])
        })
    }
}

impl<SPI, CS, RST> TagReader for RfidRc522<SPI, CS, RST>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    RST: OutputPin,
{
    fn request(&mut self, mode: u8) -> Result<TagType, RFIDError> {
        RfidRc522::request(self, mode)
    }

    fn anticoll(&mut self) -> Result<Uid, RFIDError> {
        RfidRc522::anticoll(self)
    }
}
