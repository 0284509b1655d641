/// Factory calibration coefficients C1..C6, unpacked from the four
/// calibration words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calibration {
    pub c1: u16,
    pub c2: u16,
    pub c3: u16,
    pub c4: u16,
    pub c5: u16,
    pub c6: u16,
}

/// Uncompensated ADC words: D1 pressure, D2 temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub d1: u16,
    pub d2: u16,
}

/// Compensated reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Pressure in mbar.
    pub pressure: u16,
    /// Temperature in 0.1 °C.
    pub temperature: i16,
}
