use rppal::gpio::{Gpio, IoPin, Mode};

use crate::clock::{ClockGenerator, MappedRegisters};
use crate::error::{Error, SetupError};
use crate::sensor::Ms5x;
use crate::structs::{Calibration, Reading};
use crate::transport::SpiTransport;

// GPCLK0 is ALT0 on GPIO4.
const CLOCK_PIN: u8 = 4;

/// Sensor wired to a Raspberry Pi: reference clock on GPIO4, data on
/// SPI0/CE0.
///
/// The clock pin stays in its clock function for as long as this value
/// lives.
pub struct Rpims5x {
    sensor: Ms5x<SpiTransport>,
    _clock: ClockGenerator<MappedRegisters>,
    _clock_pin: IoPin,
}

/// Start the reference clock, open SPI, reset the sensor and read its
/// calibration.
///
/// Needs access to `/dev/mem`, `/dev/gpiomem` and `/dev/spidev0.0`.
pub fn init() -> Result<Rpims5x, Error> {
    let registers = MappedRegisters::clock_manager().map_err(SetupError::MemoryMap)?;
    let clock_pin = Gpio::new()
        .and_then(|gpio| gpio.get(CLOCK_PIN))
        .map_err(SetupError::Gpio)?
        .into_io(Mode::Alt0);

    let mut clock = ClockGenerator::new(registers);
    clock.start();

    let transport = SpiTransport::open()?;
    let sensor = Ms5x::new(transport)?;

    Ok(Rpims5x {
        sensor,
        _clock: clock,
        _clock_pin: clock_pin,
    })
}

impl Rpims5x {
    pub fn calibration(&self) -> &Calibration {
        self.sensor.calibration()
    }

    pub fn read(&mut self) -> Result<Reading, Error> {
        self.sensor.read()
    }

    pub fn read_averaged(&mut self, samples: u16) -> Result<Reading, Error> {
        self.sensor.read_averaged(samples)
    }
}
