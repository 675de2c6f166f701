use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, in the column layout of the public launch dataset.
#[derive(Serialize)]
struct LaunchRow<'a> {
    #[serde(rename = "")]
    index: usize,
    #[serde(rename = "Flight Number")]
    flight_number: usize,
    #[serde(rename = "Launch Site")]
    launch_site: &'a str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'a str,
}

/// Booster generations in flight order: (category, flights, payload ceiling kg, success rate).
const ERAS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 1_000.0, 0.2),
    ("v1.1", 15, 4_500.0, 0.35),
    ("FT", 24, 9_600.0, 0.65),
    ("B4", 11, 7_000.0, 0.55),
    ("B5", 1, 3_700.0, 1.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// splitmix64, deterministic across runs.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let mut rng = SplitMix64(42);

    let out_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let output_path = out_dir.join("spacex_launch_dash.csv");

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut flight = 0;
    for (category, flights, ceiling, success_rate) in ERAS {
        for _ in 0..flights {
            // Payloads are rounded to whole kilograms; the earliest flights carried none.
            let payload_mass_kg = if flight < 2 {
                0.0
            } else {
                (rng.next_f64() * ceiling).round()
            };
            let row = LaunchRow {
                index: flight,
                flight_number: flight + 1,
                launch_site: *rng.pick(&SITES),
                class: u8::from(rng.next_f64() < success_rate),
                payload_mass_kg,
                booster_version: format!("F9 {category}  B{:04}", 1000 + flight),
                booster_category: category,
            };
            writer
                .serialize(&row)
                .with_context(|| format!("writing flight {}", row.flight_number))?;
            flight += 1;
        }
    }

    writer.flush().context("flushing CSV")?;

    println!("Wrote {flight} launch records to {}", output_path.display());
    Ok(())
}
