//! MS5x family pressure sensor driver for the Raspberry Pi.
//!
//! The sensor needs a 32768Hz reference clock, which is generated on
//! GPIO4 (GPCLK0), and talks over SPI0. Readings are pressure in mbar and
//! temperature in 0.1 °C.
//!
//! ```no_run
//! let mut sensor = rpims5x::init()?;
//! let reading = sensor.read_averaged(4)?;
//! println!("{}mbar {:.1}C", reading.pressure, f32::from(reading.temperature) / 10.0);
//! # Ok::<(), rpims5x::Error>(())
//! ```
//!
//! [`Ms5x`] runs over any [`Transport`], which is how the driver is tested
//! without hardware.

pub mod calibration;
pub mod clock;
pub mod compensation;
mod error;
mod rpi;
pub mod sensor;
mod structs;
pub mod transport;

pub use compensation::compensate;
pub use error::{Error, SetupError, TransferError};
pub use rpi::{init, Rpims5x};
pub use sensor::Ms5x;
pub use structs::{Calibration, RawSample, Reading};
pub use transport::{SpiTransport, Transport};
