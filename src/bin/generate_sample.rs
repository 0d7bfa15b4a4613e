//! Writes `sample_map.csv`, an offline snapshot in the shared sheet's layout:
//! ten bookkeeping columns, then Tip, İsim, X, Y. A few rows carry unusable
//! coordinates so the loader's row dropping is visible in the viewer.
//!
//! Usage: `cargo run --bin generate_sample [output.csv]`

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

    /// Integer map coordinate in -200..=200.
    fn coordinate(&mut self) -> i64 {
        (self.next_f64() * 401.0).floor() as i64 - 200
    }

    /// Box-Muller transform, rounded to the nearest map square.
    fn gauss_coordinate(&mut self, mean: f64, std_dev: f64) -> i64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (mean + std_dev * z).round().clamp(-200.0, 200.0) as i64
    }
}

const FILLER_COLUMNS: usize = 10;

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_map.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut header: Vec<String> = (0..FILLER_COLUMNS).map(|i| format!("Not {i}")).collect();
    header.extend(["Tip", "İsim", "X", "Y"].map(String::from));
    writer.write_record(&header)?;

    let mut rows = 0usize;
    let mut write_row = |writer: &mut csv::Writer<std::fs::File>,
                         tip: &str,
                         name: &str,
                         x: String,
                         y: String|
     -> Result<()> {
        let mut record: Vec<String> = vec![String::new(); FILLER_COLUMNS];
        record.extend([tip.to_string(), name.to_string(), x, y]);
        writer.write_record(&record)?;
        rows += 1;
        Ok(())
    };

    // Alliance players clustered around the home quadrant.
    for i in 0..25 {
        let x = rng.gauss_coordinate(40.0, 25.0);
        let y = rng.gauss_coordinate(-30.0, 25.0);
        write_row(&mut writer, "Oyuncu", &format!("Oyuncu{i:02}"), x.to_string(), y.to_string())?;
    }

    // Targets spread over the whole map.
    for i in 0..40 {
        let x = rng.coordinate();
        let y = rng.coordinate();
        write_row(&mut writer, "Hedef", &format!("Hedef{i:02}"), x.to_string(), y.to_string())?;
    }

    // A category without a reserved colour.
    for i in 0..8 {
        let x = rng.coordinate();
        let y = rng.coordinate();
        write_row(&mut writer, "Vaha", &format!("Vaha{i}"), x.to_string(), y.to_string())?;
    }

    // Rows the viewer must drop.
    write_row(&mut writer, "Hedef", "eksik", String::new(), "12".into())?;
    write_row(&mut writer, "Oyuncu", "yazı", "kuzey".into(), "5".into())?;

    writer.flush().context("flushing CSV")?;
    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
