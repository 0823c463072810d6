#![no_std]
#![no_main]

use arduino_hal::spi;
use embedded_hal::spi::{Mode, Phase, Polarity};
use panic_halt as _;
use rfid_tap_station::commands::PICC_REQIDL;
use rfid_tap_station::RfidRc522;
use ufmt::uwriteln;

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);

    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);

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

    let mut rfid = RfidRc522::new(spi, cs_pin, rst);
    if rfid.init(&mut serial).is_err() {
        uwriteln!(&mut serial, "Reader init failed").ok();
    }

    loop {
        if rfid.request(PICC_REQIDL).is_ok() {
            match rfid.anticoll() {
                Ok(uid) => uwriteln!(&mut serial, "Card UID: {}", uid).ok(),
                Err(e) => uwriteln!(&mut serial, "Anticollision failed: {:?}", e).ok(),
            };
        }
        arduino_hal::delay_ms(500);
    }
}
