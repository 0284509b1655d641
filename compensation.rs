use std::convert::TryFrom;

use crate::structs::{Calibration, RawSample, Reading};

/// Convert raw ADC words into pressure (mbar) and temperature (0.1 °C)
/// with the MS5541C integer compensation, including the second order
/// temperature correction.
///
/// All intermediates are `i32`; `>>` on them is an arithmetic shift, which
/// the formula relies on once `dt` goes negative.
pub fn compensate(raw: RawSample, calibration: &Calibration) -> Reading {
    let c1 = i32::from(calibration.c1);
    let c2 = i32::from(calibration.c2);
    let c3 = i32::from(calibration.c3);
    let c4 = i32::from(calibration.c4);
    let c5 = i32::from(calibration.c5);
    let d1 = i32::from(raw.d1);
    let d2 = i32::from(raw.d2);

    let ut1 = (c5 << 3) + 10000;
    let dt = d2 - ut1;

    let off = c2 + (((c4 - 250) * dt) >> 12) + 10000;
    let sens = (c1 / 2) + (((c3 + 200) * dt) >> 13) + 3000;
    let pressure = ((sens * (d1 - off)) >> 12) + 1000;

    let dt2 = dt - (((dt >> 7) * (dt >> 7)) >> 3);
    let temperature = temperature_from(dt2, calibration);

    log::trace!(
        "temperature first order {}, second order {}",
        temperature_from(dt, calibration),
        temperature
    );

    Reading {
        pressure: saturate_u16(pressure),
        temperature: saturate_i16(temperature),
    }
}

fn temperature_from(dt: i32, calibration: &Calibration) -> i32 {
    200 + ((dt * (i32::from(calibration.c6) + 100)) >> 11)
}

fn saturate_u16(value: i32) -> u16 {
    u16::try_from(value).unwrap_or(if value < 0 { 0 } else { u16::MAX })
}

fn saturate_i16(value: i32) -> i16 {
    i16::try_from(value).unwrap_or(if value < 0 { i16::MIN } else { i16::MAX })
}
