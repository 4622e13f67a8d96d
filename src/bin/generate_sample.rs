//! Writes a synthetic copy of the six dashboard input files.
//!
//! Usage: `generate_sample [OUTPUT_DIR]` (defaults to `data`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Seeded splitmix64 stream; the same seed always yields the same files.
struct SampleNoise {
    state: u64,
}

impl SampleNoise {
    fn seeded(seed: u64) -> Self {
        SampleNoise { state: seed }
    }

    fn next_bits(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in the open interval (0, 1).
    fn unit(&mut self) -> f64 {
        ((self.next_bits() >> 11) as f64 + 0.5) / (1u64 << 53) as f64
    }

    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let radius = (-2.0 * self.unit().ln()).sqrt();
        let angle = std::f64::consts::TAU * self.unit();
        mean + std_dev * radius * angle.cos()
    }
}

fn write_file(
    dir: &Path,
    name: &str,
    delimiter: u8,
    header: &[&str],
    rows: &[Vec<String>],
) -> Result<()> {
    let path = dir.join(name);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SampleNoise::seeded(42);

    // Hurricane counts: adjusted is fractional, unadjusted a whole count.
    let hurricanes: Vec<Vec<String>> = (1878..=2008)
        .map(|year| {
            let unadjusted = rng.gauss(6.0, 2.5).round().max(0.0);
            let correction = 2.5 * (2008 - year) as f64 / 130.0;
            vec![
                year.to_string(),
                format!("{:.4}", unadjusted + correction.max(0.0)),
                format!("{unadjusted}"),
            ]
        })
        .collect();
    write_file(
        &out_dir,
        "hur_data.csv",
        b',',
        &["Year", "Total hurricanes (adjusted)", "Total hurricanes (unadjusted)"],
        &hurricanes,
    )?;

    let energy: Vec<Vec<String>> = (1950..=2013)
        .map(|year| vec![year.to_string(), format!("{:.0}", rng.gauss(105.0, 45.0).max(15.0))])
        .collect();
    write_file(&out_dir, "cyclone_energy.csv", b',', &["Year", "ACE"], &energy)?;

    // Continental temperature: base per region plus a slow warming trend.
    let regions = [
        ("Africa", 22.0),
        ("Asia", 11.5),
        ("Europe", 8.5),
        ("North America", 9.5),
        ("Oceania", 21.0),
        ("South America", 20.5),
    ];
    let mut continents = Vec::new();
    for year in 1900..=2013 {
        for &(region, base) in &regions {
            let trend = 0.012 * (year - 1900) as f64;
            continents.push(vec![
                region.to_string(),
                year.to_string(),
                format!("{:.3}", base + trend + rng.gauss(0.0, 0.3)),
            ]);
        }
    }
    write_file(&out_dir, "revised_cont.csv", b',', &["Region", "Year", "Temp"], &continents)?;

    let countries = [
        ("Canada", -3.5),
        ("Norway", 1.5),
        ("Russia", -4.0),
        ("United Kingdom", 8.8),
        ("France", 11.0),
        ("Spain", 13.5),
        ("United States", 8.5),
        ("Mexico", 21.0),
        ("Brazil", 25.0),
        ("Argentina", 14.5),
        ("Egypt", 22.0),
        ("Nigeria", 26.8),
        ("South Africa", 17.5),
        ("India", 24.0),
        ("China", 7.0),
        ("Japan", 11.2),
        ("Indonesia", 25.9),
        ("Australia", 21.6),
    ];
    let mut global = Vec::new();
    for year in (1900..=2010).step_by(5) {
        for &(country, base) in &countries {
            let trend = 0.01 * (year - 1900) as f64;
            global.push(vec![
                country.to_string(),
                format!("{year}-01-01"),
                format!("{:.3}", base + trend + rng.gauss(0.0, 0.4)),
            ]);
        }
    }
    write_file(&out_dir, "qtemp.csv", b',', &["Country", "Date", "Average Temperature"], &global)?;

    // Arctic ice: tab separated, headers padded with leading spaces.
    let ice: Vec<Vec<String>> = (1979..=2016)
        .map(|year| {
            let decline = 0.085 * (year - 1979) as f64;
            let extent = 7.2 - decline + rng.gauss(0.0, 0.3);
            let area = 4.9 - decline * 0.9 + rng.gauss(0.0, 0.25);
            vec![year.to_string(), format!("{extent:.2}"), format!("{area:.2}")]
        })
        .collect();
    write_file(&out_dir, "arctic_sea_ice.csv", b'\t', &["year", " extent", "   area"], &ice)?;

    let mut level = 0.0;
    let sea: Vec<Vec<String>> = (1880..=2013)
        .map(|year| {
            let row = vec![year.to_string(), format!("{level:.9}")];
            level += 0.066 + rng.gauss(0.0, 0.08);
            row
        })
        .collect();
    write_file(
        &out_dir,
        "sea_levels.csv",
        b',',
        &["Year", "CSIRO - Adjusted sea level (inches)"],
        &sea,
    )?;

    Ok(())
}
