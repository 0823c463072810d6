#![no_std]
// src/lib.rs

//! Firmware core for an MFRC522 tap station: the reader driver, presence
//! debouncing, report payloads and the status light loop.

pub mod card_types;
pub mod commands;
pub mod config;
pub mod cs_pin_wrapper;
pub mod errors;
pub mod indicator;
pub mod presence;
pub mod registers;
pub mod report;
pub mod rfid_rc522;
pub mod station;

pub use card_types::{TagType, Uid};
pub use config::StationConfig;
pub use errors::RFIDError;
pub use indicator::{Indicator, Rgb};
pub use presence::{PresenceTracker, TagReader, Transition};
pub use report::{Report, Reporter};
pub use rfid_rc522::RfidRc522;
pub use station::TapStation;
