use std::io;

use thiserror::Error;

/// A single SPI transaction with the sensor went wrong.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("short SPI write: {written} of {expected} bytes sent")]
    Write { expected: usize, written: usize },
    #[error("short SPI read: {read} of {expected} bytes received")]
    Read { expected: usize, read: usize },
    #[error("SPI transfer failed: {0}")]
    Spi(#[source] rppal::spi::Error),
}

/// Initialization could not bring the sensor up.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("couldn't map clock registers: {0}")]
    MemoryMap(#[source] io::Error),
    #[error("couldn't route the reference clock pin: {0}")]
    Gpio(#[from] rppal::gpio::Error),
    #[error("couldn't configure SPI: {0}")]
    Spi(#[from] rppal::spi::Error),
    #[error("sensor reset failed: {0}")]
    Reset(#[source] TransferError),
    #[error("calibration read failed: {0}")]
    Calibration(#[source] TransferError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("averaged read needs at least one sample")]
    NoSamples,
}
