// src/commands.rs

// Commands for the MFRC522
pub const PCD_IDLE: u8 = 0x00;
pub const PCD_TRANSCEIVE: u8 = 0x0C;
pub const PCD_RESETPHASE: u8 = 0x0F; // Soft reset

// Commands sent to the card
pub const PICC_REQIDL: u8 = 0x26;    // REQA, wakes cards in the idle state
pub const PICC_REQALL: u8 = 0x52;    // WUPA, wakes idle and halted cards
pub const PICC_ANTICOLL: u8 = 0x93;  // SEL, cascade level 1
pub const ANTICOLL_NVB: u8 = 0x20;   // Two bytes sent, no UID bits known
