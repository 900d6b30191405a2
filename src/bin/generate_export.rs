use std::env;
use std::f64::consts::TAU;
use std::fs::File;
use std::io::{BufWriter, Write};

use time::Date;

/// Minimal deterministic PRNG (xoshiro256**)
struct Xoshiro {
    state: [u64; 4],
}

impl Xoshiro {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        Xoshiro { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        mean + std_dev * z
    }
}

/// Seasonal sinusoid (coldest mid-January) plus a diurnal cycle peaking
/// around 15:00, with Gaussian noise on top.
fn hourly_temperature(day_of_year: u16, hour: u8, rng: &mut Xoshiro) -> f64 {
    let seasonal = -10.0 * (TAU * (day_of_year as f64 + 10.0) / 365.25).cos();
    let diurnal = 4.0 * (TAU * (hour as f64 - 9.0) / 24.0).sin();
    11.0 + seasonal + diurnal + rng.gauss(0.0, 1.5)
}

fn main() {
    let mut rng = Xoshiro::new(42);
    let year = 2024;

    let output_path = env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("dataexport_sample.csv"));
    let file = File::create(&output_path).expect("Failed to create output file");
    let mut out = BufWriter::new(file);

    // Ten metadata lines, as in the real exports.
    let preamble = [
        "location,Sample Station",
        "latitude,47.5584",
        "longitude,7.5733",
        "elevation,279",
        "timezone,local",
        "variable,Temperature",
        "unit,degC",
        "level,2 m elevation corrected",
        "aggregation,hourly",
        "timestamp,temperature",
    ];
    for line in preamble {
        writeln!(out, "{line}").expect("Failed to write preamble");
    }

    let mut count: u64 = 0;
    for ordinal in 1..=366 {
        let Ok(date) = Date::from_ordinal_date(year, ordinal) else {
            break;
        };
        for hour in 0..24u8 {
            let temperature = hourly_temperature(ordinal, hour, &mut rng);
            writeln!(
                out,
                "{year:04}{month:02}{day:02}T{hour:02}00,{temperature:.2}",
                month = date.month() as u8,
                day = date.day(),
            )
            .expect("Failed to write reading");
            count += 1;
        }
    }
    out.flush().expect("Failed to flush output");

    println!("Wrote {count} hourly readings for {year} to {output_path}");
}
