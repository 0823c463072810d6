use crate::card_types::{TagType, Uid};
use crate::errors::RFIDError;

/// The two discovery calls the station needs from a reader.
pub trait TagReader {
    fn request(&mut self, mode: u8) -> Result<TagType, RFIDError>;
    fn anticoll(&mut self) -> Result<Uid, RFIDError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A UID different from the last reported one was read.
    Arrived(Uid),
    /// The reported card has been missing for longer than the grace window.
    Removed,
}

/// Turns raw poll results into arrival and removal transitions.
///
/// A card is removed once no request has succeeded for more than `grace_ms`
/// since the first miss. Any successful UID read restarts the window.
pub struct PresenceTracker {
    grace_ms: u32,
    current: Option<Uid>,
    missing_since: Option<u32>,
}

impl PresenceTracker {
    pub fn new(grace_ms: u32) -> Self {
        PresenceTracker {
            grace_ms,
            current: None,
            missing_since: None,
        }
    }

    pub fn current(&self) -> Option<Uid> {
        self.current
    }

    /// Runs one request/anticoll round. `now_ms` may wrap.
    pub fn poll<R: TagReader>(&mut self, reader: &mut R, mode: u8, now_ms: u32) -> Option<Transition> {
        if reader.request(mode).is_ok() {
            // An answer without a readable UID neither confirms nor denies the card
            let uid = reader.anticoll().ok()?;
            self.missing_since = None;
            if self.current == Some(uid) {
                return None;
            }
            self.current = Some(uid);
            return Some(Transition::Arrived(uid));
        }

        if self.current.is_none() {
            return None;
        }
        match self.missing_since {
            None => {
                self.missing_since = Some(now_ms);
                None
            }
            Some(since) if now_ms.wrapping_sub(since) > self.grace_ms => {
                self.current = None;
                self.missing_since = None;
                Some(Transition::Removed)
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::commands::PICC_REQIDL;
    use std::collections::VecDeque;

    #[derive(Clone, Copy)]
    enum Poll {
        Absent,
        Garbled,
        Present(Uid),
    }

    struct ScriptedReader {
        polls: VecDeque<Poll>,
        current: Poll,
    }

    impl ScriptedReader {
        fn new(polls: &[Poll]) -> Self {
            ScriptedReader {
                polls: polls.iter().copied().collect(),
                current: Poll::Absent,
            }
        }
    }

    impl TagReader for ScriptedReader {
        fn request(&mut self, _mode: u8) -> Result<TagType, RFIDError> {
            self.current = self.polls.pop_front().unwrap_or(Poll::Absent);
            match self.current {
                Poll::Absent => Err(RFIDError::Error),
                _ => Ok(TagType([0x04, 0x00])),
            }
        }

        fn anticoll(&mut self) -> Result<Uid, RFIDError> {
            match self.current {
                Poll::Present(uid) => Ok(uid),
                _ => Err(RFIDError::Error),
            }
        }
    }

    const CARD: Uid = Uid([0x04, 0x9A, 0x3C, 0x7F]);
    const OTHER: Uid = Uid([0xDE, 0xAD, 0xBE, 0xEF]);

    fn run(tracker: &mut PresenceTracker, reader: &mut ScriptedReader, times: &[u32]) -> std::vec::Vec<Option<Transition>> {
        times
            .iter()
            .map(|&now| tracker.poll(reader, PICC_REQIDL, now))
            .collect()
    }

    #[test]
    fn arrival_is_reported_once() {
        let mut tracker = PresenceTracker::new(1000);
        let mut reader = ScriptedReader::new(&[Poll::Present(CARD); 3]);

        let events = run(&mut tracker, &mut reader, &[0, 100, 200]);
        assert_eq!(events, [Some(Transition::Arrived(CARD)), None, None]);
        assert_eq!(tracker.current(), Some(CARD));
    }

    #[test]
    fn removal_waits_out_the_grace_window() {
        let mut tracker = PresenceTracker::new(1000);
        let mut reader = ScriptedReader::new(&[Poll::Present(CARD)]);

        let events = run(&mut tracker, &mut reader, &[0, 100, 600, 1100, 1101]);
        assert_eq!(
            events,
            [Some(Transition::Arrived(CARD)), None, None, None, Some(Transition::Removed)]
        );
        assert_eq!(tracker.current(), None);
    }

    #[test]
    fn reread_inside_window_keeps_the_card() {
        let mut tracker = PresenceTracker::new(1000);
        let mut reader = ScriptedReader::new(&[
            Poll::Present(CARD),
            Poll::Absent,
            Poll::Present(CARD),
            Poll::Absent,
            Poll::Absent,
        ]);

        let events = run(&mut tracker, &mut reader, &[0, 100, 900, 1000, 1500]);
        assert_eq!(events, [Some(Transition::Arrived(CARD)), None, None, None, None]);
        assert_eq!(tracker.current(), Some(CARD));
    }

    #[test]
    fn garbled_uid_neither_starts_nor_resets_window() {
        let mut tracker = PresenceTracker::new(1000);
        let mut reader = ScriptedReader::new(&[
            Poll::Present(CARD),
            Poll::Absent,
            Poll::Garbled,
            Poll::Absent,
        ]);

        let events = run(&mut tracker, &mut reader, &[0, 100, 500, 1200]);
        assert_eq!(
            events,
            [Some(Transition::Arrived(CARD)), None, None, Some(Transition::Removed)]
        );
    }

    #[test]
    fn garbled_uid_alone_is_not_an_arrival() {
        let mut tracker = PresenceTracker::new(1000);
        let mut reader = ScriptedReader::new(&[Poll::Garbled, Poll::Absent]);

        let events = run(&mut tracker, &mut reader, &[0, 5000]);
        assert_eq!(events, [None, None]);
    }

    #[test]
    fn card_swap_reports_the_new_uid() {
        let mut tracker = PresenceTracker::new(1000);
        let mut reader = ScriptedReader::new(&[Poll::Present(CARD), Poll::Present(OTHER)]);

        let events = run(&mut tracker, &mut reader, &[0, 100]);
        assert_eq!(
            events,
            [Some(Transition::Arrived(CARD)), Some(Transition::Arrived(OTHER))]
        );
    }

    #[test]
    fn window_survives_clock_wrap() {
        let mut tracker = PresenceTracker::new(1000);
        let mut reader = ScriptedReader::new(&[Poll::Present(CARD)]);

        let start = u32::MAX - 500;
        let events = run(&mut tracker, &mut reader, &[start, start + 100, 400, 700]);
        assert_eq!(
            events,
            [Some(Transition::Arrived(CARD)), None, None, Some(Transition::Removed)]
        );
    }
}
