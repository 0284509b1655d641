use crate::calibration;
use crate::compensation::compensate;
use crate::error::{Error, SetupError, TransferError};
use crate::structs::{Calibration, RawSample, Reading};
use crate::transport::Transport;

const CMD_RESET: [u8; 3] = [0x15, 0x55, 0x40];
// The sensor labels these the other way round: 0x20 yields D2, 0x40 D1.
const CMD_CONVERT_D2: [u8; 2] = [0x0f, 0x20];
const CMD_CONVERT_D1: [u8; 2] = [0x0f, 0x40];

/// MS5x pressure sensor with its calibration loaded.
///
/// One call at a time: each read drives the transport exclusively until it
/// returns.
pub struct Ms5x<T> {
    transport: T,
    calibration: Calibration,
}

impl<T: Transport> Ms5x<T> {
    /// Reset the sensor and read its calibration.
    pub fn new(mut transport: T) -> Result<Ms5x<T>, Error> {
        transport
            .send_command(&CMD_RESET)
            .map_err(SetupError::Reset)?;
        let calibration = calibration::load(&mut transport).map_err(SetupError::Calibration)?;
        log::debug!("setup done");

        Ok(Ms5x {
            transport,
            calibration,
        })
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Sample D2 then D1.
    pub fn read_raw(&mut self) -> Result<RawSample, TransferError> {
        let d2 = self.transport.exchange(&CMD_CONVERT_D2)?;
        let d1 = self.transport.exchange(&CMD_CONVERT_D1)?;
        log::debug!("d1 {} d2 {}", d1, d2);
        Ok(RawSample { d1, d2 })
    }

    pub fn read(&mut self) -> Result<Reading, Error> {
        let raw = self.read_raw()?;
        let reading = compensate(raw, &self.calibration);
        log::debug!(
            "pressure {} temperature {}",
            reading.pressure,
            reading.temperature
        );
        Ok(reading)
    }

    /// Take `samples` readings and return their truncated mean.
    ///
    /// The MS5541C datasheet recommends 4 or 8 samples for a stable 1 mbar
    /// resolution.
    pub fn read_averaged(&mut self, samples: u16) -> Result<Reading, Error> {
        if samples == 0 {
            return Err(Error::NoSamples);
        }

        let mut pressure_sum = 0u32;
        let mut temperature_sum = 0i32;
        for _ in 0..samples {
            let reading = self.read()?;
            pressure_sum += u32::from(reading.pressure);
            temperature_sum += i32::from(reading.temperature);
        }

        // Means of u16/i16 values always fit back into their type.
        Ok(Reading {
            pressure: (pressure_sum / u32::from(samples)) as u16,
            temperature: (temperature_sum / i32::from(samples)) as i16,
        })
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;

    // C1 4998, C2 5268, C3 401, C4 500, C5 2003, C6 63
    const WORDS: [u16; 4] = [39989, 9503, 25683, 64063];

    fn sensor(samples: &[u16]) -> Ms5x<FakeTransport> {
        let mut words = WORDS.to_vec();
        words.extend_from_slice(samples);
        Ms5x::new(FakeTransport::new(&words)).unwrap()
    }

    #[test]
    fn new_resets_before_reading_calibration() {
        let sensor = sensor(&[]);

        assert_eq!(*sensor.calibration(), Calibration::from_words(WORDS));
        let transport = sensor.release();
        assert_eq!(transport.commands[0], vec![0x15, 0x55, 0x40]);
        assert_eq!(transport.commands.len(), 5);
    }

    #[test]
    fn new_reports_failed_reset_as_setup_error() {
        let mut transport = FakeTransport::new(&WORDS);
        transport.short_write = true;

        match Ms5x::new(transport) {
            Err(Error::Setup(SetupError::Reset(TransferError::Write { .. }))) => {}
            Err(e) => panic!("unexpected error: {:?}", e),
            Ok(_) => panic!("setup should fail"),
        }
    }

    #[test]
    fn new_reports_short_calibration_as_setup_error() {
        match Ms5x::new(FakeTransport::new(&WORDS[..2])) {
            Err(Error::Setup(SetupError::Calibration(TransferError::Read { .. }))) => {}
            Err(e) => panic!("unexpected error: {:?}", e),
            Ok(_) => panic!("setup should fail"),
        }
    }

    #[test]
    fn read_samples_temperature_first() {
        // D2 arrives first, then D1.
        let mut sensor = sensor(&[28000, 15400]);
        let reading = sensor.read().unwrap();

        assert_eq!(
            reading,
            Reading {
                pressure: 1016,
                temperature: 355,
            }
        );
        let transport = sensor.release();
        assert_eq!(transport.commands[5..], [vec![0x0f, 0x20], vec![0x0f, 0x40]]);
        assert_eq!(transport.delays, 2);
    }

    #[test]
    fn read_propagates_transfer_errors() {
        let mut sensor = sensor(&[28000]);
        match sensor.read() {
            Err(Error::Transfer(TransferError::Read { .. })) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn averaging_identical_samples_returns_the_sample() {
        let mut sensor = sensor(&[25000, 15220, 25000, 15220, 25000, 15220, 25000, 15220]);
        let reading = sensor.read_averaged(4).unwrap();

        assert_eq!(
            reading,
            Reading {
                pressure: 1019,
                temperature: 117,
            }
        );
        assert_eq!(sensor.release().remaining(), 0);
    }

    #[test]
    fn averaging_truncates() {
        // Pressures 1000, 1001, 1001.
        let mut sensor = sensor(&[28000, 15388, 28000, 15389, 28000, 15389]);
        let reading = sensor.read_averaged(3).unwrap();

        assert_eq!(reading.pressure, 1000);
        assert_eq!(reading.temperature, 355);
    }

    #[test]
    fn averaging_rejects_zero_samples() {
        let mut sensor = sensor(&[28000, 15400]);
        match sensor.read_averaged(0) {
            Err(Error::NoSamples) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        // Nothing was sent to the sensor.
        assert_eq!(sensor.release().commands.len(), 5);
    }

    #[test]
    fn averaging_stops_at_first_failure() {
        let mut sensor = sensor(&[28000, 15400, 28000]);
        assert!(sensor.read_averaged(2).is_err());
    }
}
