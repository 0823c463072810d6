// src/config.rs

use crate::commands::PICC_REQIDL;

/// Station behaviour knobs. Board wiring stays in the binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationConfig {
    /// Used as the `bus_station_<n>` key in reports.
    pub station_number: u8,
    /// REQA (`PICC_REQIDL`) or WUPA (`PICC_REQALL`).
    pub request_mode: u8,
    /// A card counts as removed once it has been missing for longer than this.
    pub removal_grace_ms: u32,
    pub arrival_flash_ms: u32,
    /// Red on, then off, for this long each while no card is present.
    pub heartbeat_ms: u32,
    /// Pause between polls while a card is present.
    pub present_poll_ms: u32,
}

impl Default for StationConfig {
    fn default() -> Self {
        StationConfig {
            station_number: 1,
            request_mode: PICC_REQIDL,
            removal_grace_ms: 1000,
            arrival_flash_ms: 300,
            heartbeat_ms: 50,
            present_poll_ms: 100,
        }
    }
}
