use core::fmt::Write;

use heapless::String;

use crate::card_types::Uid;

/// Room for `{"bus_station_255":{"status":1,"card_id":"xxxxxxxx"}}`.
pub const PAYLOAD_CAPACITY: usize = 64;

/// Sends a JSON payload to the key-value endpoint.
pub trait Reporter {
    type Error;

    fn report(&mut self, payload: &str) -> Result<(), Self::Error>;
}

/// Presence state of one station as stored by the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub station: u8,
    /// `Some` while a card is on the reader.
    pub card: Option<Uid>,
}

impl Report {
    pub fn status(&self) -> u8 {
        u8::from(self.card.is_some())
    }

    pub fn to_json(&self) -> Result<String<PAYLOAD_CAPACITY>, core::fmt::Error> {
        let card_id = match self.card {
            Some(uid) => uid.to_hex(),
            None => String::new(),
        };
        let mut payload = String::new();
        write!(
            payload,
            "{{\"bus_station_{}\":{{\"status\":{},\"card_id\":\"{}\"}}}}",
            self.station,
            self.status(),
            card_id
        )?;
        Ok(payload)
    }
}
