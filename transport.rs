use std::thread;
use std::time::Duration;

use rppal::spi::{BitOrder, Bus, Mode, SlaveSelect, Spi};

use crate::error::{SetupError, TransferError};

// MS5541C accepts up to 500kHz on its serial interface.
const SPI_CLOCK_SPEED: u32 = 500_000;
const SPI_BITS_PER_WORD: u8 = 8;

/// Time the sensor needs to finish an ADC conversion.
pub const CONVERSION_TIME: Duration = Duration::from_millis(35);

/// Byte-exact request/response access to the sensor.
pub trait Transport {
    /// Send a command; every byte must go out.
    fn send_command(&mut self, command: &[u8]) -> Result<(), TransferError>;

    /// Read one big-endian 16-bit response word.
    fn read_word(&mut self) -> Result<u16, TransferError>;

    /// Block until a conversion started by a command has completed.
    fn conversion_delay(&mut self) {
        thread::sleep(CONVERSION_TIME);
    }

    /// Start a conversion and read back its result.
    fn exchange(&mut self, command: &[u8]) -> Result<u16, TransferError> {
        self.send_command(command)?;
        self.conversion_delay();
        self.read_word()
    }
}

/// Sensor on SPI0, CE0 (`/dev/spidev0.0`).
pub struct SpiTransport {
    spi: Spi,
}

impl SpiTransport {
    pub fn open() -> Result<SpiTransport, SetupError> {
        // Mode 1: clock idles low, data sampled on the second edge.
        let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, SPI_CLOCK_SPEED, Mode::Mode1)?;
        spi.set_bits_per_word(SPI_BITS_PER_WORD)?;
        spi.set_bit_order(BitOrder::MsbFirst)?;
        log::debug!("spi initialized");

        Ok(SpiTransport { spi })
    }
}

impl Transport for SpiTransport {
    fn send_command(&mut self, command: &[u8]) -> Result<(), TransferError> {
        let written = self.spi.write(command).map_err(TransferError::Spi)?;
        if written != command.len() {
            return Err(TransferError::Write {
                expected: command.len(),
                written,
            });
        }
        Ok(())
    }

    fn read_word(&mut self) -> Result<u16, TransferError> {
        let mut buffer = [0u8; 2];
        let read = self.spi.read(&mut buffer).map_err(TransferError::Spi)?;
        if read != buffer.len() {
            return Err(TransferError::Read {
                expected: buffer.len(),
                read,
            });
        }
        Ok(u16::from_be_bytes(buffer))
    }
}
