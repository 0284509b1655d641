use crate::error::TransferError;
use crate::structs::Calibration;
use crate::transport::Transport;

// Calibration word read commands, W1..W4.
const CMD_READ_W1: [u8; 2] = [0x1d, 0x50];
const CMD_READ_W2: [u8; 2] = [0x1d, 0x60];
const CMD_READ_W3: [u8; 2] = [0x1d, 0x90];
const CMD_READ_W4: [u8; 2] = [0x1d, 0xa0];

impl Calibration {
    /// Unpack C1..C6 from the calibration words W1..W4.
    ///
    /// Bit layout, MSB first:
    ///
    /// ```text
    /// W1: C1[12:0]  C2[12:10]
    /// W2: C2[9:0]   C5[11:6]
    /// W3: C3[9:0]   C5[5:0]
    /// W4: C4[8:0]   C6[6:0]
    /// ```
    pub fn from_words(words: [u16; 4]) -> Calibration {
        let [w1, w2, w3, w4] = words;

        Calibration {
            c1: (w1 >> 3) & 0x1fff,
            c2: ((w1 & 0x7) << 10) | ((w2 >> 6) & 0x3ff),
            c3: (w3 >> 6) & 0x3ff,
            c4: (w4 >> 7) & 0x7ff,
            c5: ((w2 & 0x3f) << 6) | (w3 & 0x3f),
            c6: w4 & 0x7f,
        }
    }
}

/// Read the four calibration words from the sensor and unpack them.
pub fn load<T: Transport>(transport: &mut T) -> Result<Calibration, TransferError> {
    let mut words = [0u16; 4];
    for (n, command) in [CMD_READ_W1, CMD_READ_W2, CMD_READ_W3, CMD_READ_W4]
        .iter()
        .enumerate()
    {
        // PROM words are available immediately, no conversion wait.
        transport.send_command(command)?;
        words[n] = transport.read_word()?;
        log::debug!("calibration w{} {}", n + 1, words[n]);
    }

    let calibration = Calibration::from_words(words);
    log::debug!("calibration {:?}", calibration);
    Ok(calibration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;

    const WORDS: [u16; 4] = [39989, 9503, 25683, 64063];

    #[test]
    fn unpacks_each_coefficient() {
        let calibration = Calibration::from_words(WORDS);

        assert_eq!(calibration.c1, 4998);
        assert_eq!(calibration.c2, 5268);
        assert_eq!(calibration.c3, 401);
        assert_eq!(calibration.c4, 500);
        assert_eq!(calibration.c5, 2003);
        assert_eq!(calibration.c6, 63);
    }

    #[test]
    fn coefficients_stay_within_their_fields() {
        let calibration = Calibration::from_words([0xffff; 4]);

        assert_eq!(
            calibration,
            Calibration {
                c1: 0x1fff,
                c2: 0x1fff,
                c3: 0x3ff,
                c4: 0x1ff,
                c5: 0xfff,
                c6: 0x7f,
            }
        );
        assert_eq!(Calibration::from_words([0; 4]), Calibration::default());
    }

    #[test]
    fn loads_words_in_command_order() {
        let mut transport = FakeTransport::new(&WORDS);
        let calibration = load(&mut transport).unwrap();

        assert_eq!(calibration, Calibration::from_words(WORDS));
        assert_eq!(
            transport.commands,
            vec![
                vec![0x1d, 0x50],
                vec![0x1d, 0x60],
                vec![0x1d, 0x90],
                vec![0x1d, 0xa0],
            ]
        );
        assert_eq!(transport.delays, 0);
    }

    #[test]
    fn load_fails_on_missing_word() {
        let mut transport = FakeTransport::new(&WORDS[..3]);
        match load(&mut transport) {
            Err(TransferError::Read { .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
