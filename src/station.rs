use embedded_hal::delay::DelayNs;
use ufmt::uWrite;

use crate::card_types::Uid;
use crate::config::StationConfig;
use crate::indicator::{Indicator, Rgb};
use crate::presence::{PresenceTracker, TagReader, Transition};
use crate::report::{Report, Reporter};

/// The tap station polling loop: read, report transitions, blink.
///
/// Time is the sum of the delays the station performed itself. Time spent talking
/// to the reader or the reporter is not counted.
pub struct TapStation<R, P, L, D> {
    reader: R,
    reporter: P,
    led: L,
    delay: D,
    config: StationConfig,
    presence: PresenceTracker,
    clock_ms: u32,
}

impl<R, P, L, D> TapStation<R, P, L, D>
where
    R: TagReader,
    P: Reporter,
    L: Indicator,
    D: DelayNs,
{
    pub fn new(reader: R, reporter: P, led: L, delay: D, config: StationConfig) -> Self {
        TapStation {
            reader,
            reporter,
            led,
            delay,
            config,
            presence: PresenceTracker::new(config.removal_grace_ms),
            clock_ms: 0,
        }
    }

    pub fn card_present(&self) -> bool {
        self.presence.current().is_some()
    }

    pub fn clock_ms(&self) -> u32 {
        self.clock_ms
    }

    /// One poll, plus the report and indicator work it triggers.
    pub fn step<W: uWrite>(&mut self, serial: &mut W) {
        let transition = self
            .presence
            .poll(&mut self.reader, self.config.request_mode, self.clock_ms);

        match transition {
            Some(Transition::Arrived(uid)) => {
                ufmt::uwriteln!(serial, "New card: {}", uid).ok();
                self.send(serial, Some(uid));
                self.led.show(Rgb::GREEN);
                self.pause(self.config.arrival_flash_ms);
                self.led.show(Rgb::OFF);
            }
            Some(Transition::Removed) => {
                ufmt::uwriteln!(serial, "Card removed.").ok();
                self.send(serial, None);
            }
            None => {}
        }

        if self.card_present() {
            self.pause(self.config.present_poll_ms);
        } else {
            self.led.show(Rgb::RED);
            self.pause(self.config.heartbeat_ms);
            self.led.show(Rgb::OFF);
            self.pause(self.config.heartbeat_ms);
        }
    }

    pub fn run<W: uWrite>(&mut self, serial: &mut W) -> ! {
        ufmt::uwriteln!(serial, "Ready to scan RFID cards...").ok();
        loop {
            self.step(serial);
        }
    }

    /// Gives the peripherals back.
    pub fn free(self) -> (R, P, L, D) {
        (self.reader, self.reporter, self.led, self.delay)
    }

    fn send<W: uWrite>(&mut self, serial: &mut W, card: Option<Uid>) {
        let report = Report {
            station: self.config.station_number,
            card,
        };
        let Ok(payload) = report.to_json() else {
            ufmt::uwriteln!(serial, "Report too large").ok();
            return;
        };

        // Failures are not retried; the next transition sends fresh state
        if self.reporter.report(payload.as_str()).is_err() {
            ufmt::uwriteln!(serial, "Report failed").ok();
            return;
        }
        match card {
            Some(uid) => ufmt::uwriteln!(
                serial,
                "Report sent | station {} | status {} | UID {}",
                report.station,
                report.status(),
                uid
            )
            .ok(),
            None => ufmt::uwriteln!(
                serial,
                "Report sent | station {} | status {}",
                report.station,
                report.status()
            )
            .ok(),
        };
    }

    fn pause(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
        self.clock_ms = self.clock_ms.wrapping_add(ms);
    }
}
