//! Write a synthetic Kepler-style catalog for demos.
//!
//! The output exercises every pipeline path: giants, dwarfs and main-sequence
//! stars, hot stars above the cut, repeated `kepid`s (multi-planet hosts),
//! blank measurements and one malformed cell.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// (share of stars, Teff range K, log g range, radius range R☉)
const POPULATIONS: [(f64, (f64, f64), (f64, f64), (f64, f64)); 5] = [
    (0.70, (4000.0, 6800.0), (4.0, 4.9), (0.5, 1.6)),
    (0.12, (3800.0, 5200.0), (3.0, 3.5), (3.0, 12.0)),
    (0.05, (3500.0, 5000.0), (1.5, 3.0), (10.0, 80.0)),
    (0.03, (7000.0, 11_500.0), (5.05, 6.0), (0.008, 0.02)),
    (0.10, (5000.0, 7500.0), (3.5, 4.0), (1.5, 3.0)),
];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_kepler.csv"));
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record([
        "kepid", "kepoi_name", "koi_period", "koi_steff", "koi_slogg", "koi_srad", "koi_kepmag",
    ])?;

    let n_stars = 400;
    let mut rows = 0usize;
    for star in 0..n_stars {
        let kepid = 757_450 + star * 7919;

        let pick = rng.next_f64();
        let mut acc = 0.0;
        let &(_, teff, logg, radius) = POPULATIONS
            .iter()
            .find(|(share, ..)| {
                acc += share;
                pick < acc
            })
            .unwrap_or(&POPULATIONS[0]);

        // A few stars above the temperature cut.
        let teff = if star % 53 == 0 {
            rng.uniform(12_500.0, 30_000.0)
        } else {
            rng.uniform(teff.0, teff.1)
        };
        let logg = rng.uniform(logg.0, logg.1);
        let radius = rng.uniform(radius.0, radius.1);
        let kepmag = rng.uniform(9.0, 17.0);

        // Multi-planet hosts repeat the kepid.
        let planets = 1 + (rng.next_f64() * 1.6) as usize;
        for planet in 1..=planets {
            let period = 10f64.powf(rng.uniform(-0.5, 2.8));
            let (teff_cell, logg_cell) = match star {
                s if s % 97 == 5 => (String::new(), String::new()),
                211 => (format!("{teff:.0}"), "n/a".to_string()),
                _ => (format!("{teff:.0}"), format!("{logg:.3}")),
            };
            writer.write_record([
                kepid.to_string(),
                format!("K{:05}.{planet:02}", star + 1),
                format!("{period:.6}"),
                teff_cell,
                logg_cell,
                format!("{radius:.3}"),
                format!("{kepmag:.3}"),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {rows} rows for {n_stars} stars to {}",
        output_path.display()
    );
    Ok(())
}
