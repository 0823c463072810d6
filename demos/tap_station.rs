#![no_std]
#![no_main]

//! Tap station on an Arduino Uno.
//!
//! The Uno has no network, so reports go out as JSON lines on the serial port,
//! interleaved with the log. A host-side bridge forwards lines starting with `{`
//! to the key-value endpoint.

use core::cell::RefCell;

use arduino_hal::spi;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Mode, Phase, Polarity};
use panic_halt as _;
use rfid_tap_station::{Indicator, Reporter, Rgb, RfidRc522, StationConfig, TapStation};
use ufmt::uWrite;

const STATION_NUMBER: u8 = 1;

/// Lets the log and the reporter share one UART.
struct SharedSerial<'a, S>(&'a RefCell<S>);

impl<S: uWrite> uWrite for SharedSerial<'_, S> {
    type Error = S::Error;

    fn write_str(&mut self, s: &str) -> Result<(), S::Error> {
        self.0.borrow_mut().write_str(s)
    }
}

impl<S: uWrite> Reporter for SharedSerial<'_, S> {
    type Error = S::Error;

    fn report(&mut self, payload: &str) -> Result<(), S::Error> {
        let mut serial = self.0.borrow_mut();
        serial.write_str(payload)?;
        serial.write_str("\n")
    }
}

/// Common-cathode RGB LED on three digital pins. Any non-zero channel is on.
struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

fn drive<P: OutputPin>(pin: &mut P, level: u8) {
    if level > 0 {
        pin.set_high().ok();
    } else {
        pin.set_low().ok();
    }
}

impl<R: OutputPin, G: OutputPin, B: OutputPin> Indicator for RgbLed<R, G, B> {
    fn show(&mut self, color: Rgb) {
        drive(&mut self.red, color.r);
        drive(&mut self.green, color.g);
        drive(&mut self.blue, color.b);
    }
}

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);

    let serial = RefCell::new(arduino_hal::default_serial!(dp, pins, 57600));
    let mut log = SharedSerial(&serial);

    let settings = spi::Settings {
        data_order: spi::DataOrder::MostSignificantFirst,
        mode: Mode {
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        },
        clock: spi::SerialClockRate::OscfOver16, // 1 MHz
    };

    let sclk = pins.d13.into_output();
    let mosi = pins.d11.into_output();
    let miso = pins.d12.into_pull_up_input();
    let cs = pins.d10.into_output();
    let (spi, cs_pin) = spi::Spi::new(dp.SPI, sclk, mosi, miso, cs, settings);

    let rst = pins.d9.into_output();

    let led = RgbLed {
        red: pins.d3.into_output(),
        green: pins.d5.into_output(),
        blue: pins.d6.into_output(),
    };

    let mut rfid = RfidRc522::new(spi, cs_pin, rst);
    if rfid.init(&mut log).is_err() {
        ufmt::uwriteln!(log, "Reader init failed").ok();
    }

    let config = StationConfig {
        station_number: STATION_NUMBER,
        ..StationConfig::default()
    };
    let mut station = TapStation::new(
        rfid,
        SharedSerial(&serial),
        led,
        arduino_hal::Delay::new(),
        config,
    );
    station.run(&mut log)
}
