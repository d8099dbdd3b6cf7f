//! Persisted ephemeris table reader.
//!
//! Format: a `Date, X, Y, Z` header followed by one row per sample, e.g.
//! `A.D. 2023-Jan-01 00:00:00.0000 TDB, -2.6e7, 1.3e8, 5.6e3`.

use glam::Vec3;
use crate::api::error::EngineError;
use crate::api::types::Sample;

/// Samples read from a table plus the number of malformed rows dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBatch {
    pub samples: Vec<Sample>,
    pub skipped: usize,
}

/// Parse a table. Header and blank lines are ignored; rows with fewer than
/// four fields or unparsable coordinates are skipped and counted.
pub fn parse_table(text: &str) -> Result<SampleBatch, EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut out = SampleBatch::default();
    for record in reader.records() {
        let record = record?;
        let first = record.get(0).unwrap_or("");
        if first.is_empty() && record.len() <= 1 {
            continue;
        }
        if first.starts_with("Date") {
            continue;
        }

        let line = record.position().map_or(0, |p| p.line());
        if record.len() < 4 {
            log::warn!("table line {line}: expected 4 fields, found {}", record.len());
            out.skipped += 1;
            continue;
        }

        match parse_xyz(&record[1], &record[2], &record[3]) {
            Some(position) => out.samples.push(Sample::new(first, position)),
            None => {
                log::warn!("table line {line}: unparsable coordinates");
                out.skipped += 1;
            }
        }
    }
    Ok(out)
}

fn parse_xyz(x: &str, y: &str, z: &str) -> Option<Vec3> {
    let x = x.parse::<f32>().ok()?;
    let y = y.parse::<f32>().ok()?;
    let z = z.parse::<f32>().ok()?;
    Some(Vec3::new(x, y, z))
}
