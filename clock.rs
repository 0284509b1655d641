use std::fs::OpenOptions;
use std::io;
use std::ptr;
use std::thread;
use std::time::Duration;

use memmap2::{MmapMut, MmapOptions};

// BCM2835 peripherals as seen from the ARM core.
const PERIPHERAL_BASE: u64 = 0x2000_0000;
const CLOCK_BASE: u64 = PERIPHERAL_BASE + 0x10_1000;
const BLOCK_SIZE: usize = 4 * 1024;

// GPCLK0 registers, in 32-bit words from the clock manager base.
const GP_CLK0_CTL: usize = 0x1c;
const GP_CLK0_DIV: usize = 0x1d;

const CLOCK_PASSWORD: u32 = 0x5a00_0000;
const CTL_SRC_OSCILLATOR: u32 = 0x01;
const CTL_ENABLE: u32 = 0x10;

pub const OSCILLATOR_FREQ: u32 = 19_000_000;
pub const CLOCK_FREQ: u32 = 32_768;

const SETTLE_TIME: Duration = Duration::from_micros(10);

/// A block of 32-bit hardware registers.
pub trait RegisterBlock {
    fn write_register(&mut self, offset: usize, value: u32);
}

/// Clock manager registers mapped from `/dev/mem`.
pub struct MappedRegisters {
    map: MmapMut,
}

impl MappedRegisters {
    pub fn clock_manager() -> io::Result<MappedRegisters> {
        let mem = OpenOptions::new().read(true).write(true).open("/dev/mem")?;
        let map = unsafe {
            MmapOptions::new()
                .offset(CLOCK_BASE)
                .len(BLOCK_SIZE)
                .map_mut(&mem)?
        };
        Ok(MappedRegisters { map })
    }
}

impl RegisterBlock for MappedRegisters {
    fn write_register(&mut self, offset: usize, value: u32) {
        assert!(offset < BLOCK_SIZE / 4, "register offset {:#x} out of block", offset);
        // The mapping is page aligned, so every word offset is aligned too.
        unsafe {
            ptr::write_volatile(self.map.as_mut_ptr().cast::<u32>().add(offset), value);
        }
    }
}

/// Integer and 12-bit fractional divisor for `target` from `oscillator`.
pub fn divisors(oscillator: u32, target: u32) -> (u32, u32) {
    let divi = oscillator / target;
    let divf = ((oscillator % target) * 4096) / target;
    (divi, divf)
}

/// General purpose clock 0, the sensor's 32768Hz reference.
pub struct ClockGenerator<R> {
    registers: R,
}

impl<R: RegisterBlock> ClockGenerator<R> {
    pub fn new(registers: R) -> ClockGenerator<R> {
        ClockGenerator { registers }
    }

    /// Stop the clock, program the divisor and start it again on the
    /// oscillator source.
    pub fn start(&mut self) {
        self.write(GP_CLK0_CTL, CLOCK_PASSWORD | CTL_SRC_OSCILLATOR);

        let (divi, divf) = divisors(OSCILLATOR_FREQ, CLOCK_FREQ);
        self.write(
            GP_CLK0_DIV,
            CLOCK_PASSWORD | (divi & 0xfff) << 12 | (divf & 0xfff),
        );

        self.write(GP_CLK0_CTL, CLOCK_PASSWORD | CTL_ENABLE | CTL_SRC_OSCILLATOR);
        log::debug!("gpio clock started, divi {} divf {}", divi, divf);
    }

    fn write(&mut self, offset: usize, value: u32) {
        self.registers.write_register(offset, value);
        thread::sleep(SETTLE_TIME);
    }
}
