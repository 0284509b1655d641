use std::env;
use std::process;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rpims5x::Reading;

// The MS5541C datasheet suggests 4 or 8 reads for 1mbar resolution.
const DEFAULT_SAMPLES: u16 = 4;
const READ_INTERVAL: Duration = Duration::from_secs(1);

fn print_reading(samples: u16, reading: &Reading) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    println!(
        "{} ({}): {}mbar {:.1}C",
        now,
        samples,
        reading.pressure,
        f32::from(reading.temperature) / 10.0
    );
}

fn main() {
    env_logger::init();

    let samples = match env::args().nth(1) {
        Some(arg) => match arg.parse::<u16>() {
            Ok(k) if k > 0 => k,
            _ => {
                eprintln!("invalid sample count: {}", arg);
                process::exit(2);
            }
        },
        None => DEFAULT_SAMPLES,
    };

    let mut sensor = match rpims5x::init() {
        Ok(sensor) => sensor,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    loop {
        match sensor.read() {
            Ok(reading) => print_reading(1, &reading),
            Err(e) => eprintln!("{}", e),
        }
        thread::sleep(READ_INTERVAL);

        match sensor.read_averaged(samples) {
            Ok(reading) => print_reading(samples, &reading),
            Err(e) => eprintln!("{}", e),
        }
        thread::sleep(READ_INTERVAL);
    }
}
