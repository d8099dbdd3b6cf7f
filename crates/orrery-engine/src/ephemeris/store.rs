use std::collections::HashMap;
use glam::Vec3;
use crate::api::error::EngineError;
use crate::api::types::Sample;
use crate::ephemeris::date::canonical_date;
use crate::ephemeris::source::SampleSource;

/// One chronologically ordered entry of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEntry {
    /// Store key, exactly as supplied.
    pub key: String,
    /// `YYYY-MM-DD` form of the key, when it could be canonicalized.
    pub canonical: Option<String>,
    pub position: Vec3,
}

/// Full date-indexed position history of one body. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EphemerisSeries {
    by_key: HashMap<String, usize>,
    entries: Vec<SeriesEntry>,
}

impl EphemerisSeries {
    /// Build a series. Input order is irrelevant; a repeated key keeps its
    /// last position.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let mut latest: HashMap<String, Vec3> = HashMap::with_capacity(samples.len());
        for sample in samples {
            latest.insert(sample.date, sample.position);
        }

        let mut entries: Vec<SeriesEntry> = latest
            .into_iter()
            .map(|(key, position)| {
                let canonical = canonical_date(&key).ok();
                if canonical.is_none() {
                    log::debug!("sample key {key:?} has no canonical date; excluded from windows");
                }
                SeriesEntry { key, canonical, position }
            })
            .collect();

        // Canonical dates first, chronologically; raw key breaks ties so that
        // several samples on one day keep their time-of-day order.
        entries.sort_by(|a, b| {
            (a.canonical.is_none(), &a.canonical, &a.key)
                .cmp(&(b.canonical.is_none(), &b.canonical, &b.key))
        });

        let by_key = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();
        Self { by_key, entries }
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &str) -> Option<Vec3> {
        self.by_key.get(key).map(|&i| self.entries[i].position)
    }

    /// Entries in chronological order.
    pub fn entries(&self) -> &[SeriesEntry] {
        &self.entries
    }

    /// Keys in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Positions in chronological order.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.entries.iter().map(|e| e.position)
    }

    pub fn first(&self) -> Option<Vec3> {
        self.entries.first().map(|e| e.position)
    }

    pub fn last(&self) -> Option<Vec3> {
        self.entries.last().map(|e| e.position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What a successful `EphemerisStore::load_from` stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadCount {
    /// Distinct samples now held for the body.
    pub samples: usize,
    /// Malformed rows the source dropped.
    pub skipped: usize,
}

/// Per-body ephemeris series, keyed by body identifier.
#[derive(Debug, Default)]
pub struct EphemerisStore {
    series: HashMap<String, EphemerisSeries>,
}

impl EphemerisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a body's series wholesale.
    pub fn load(&mut self, body_id: &str, samples: Vec<Sample>) {
        self.series
            .insert(body_id.to_string(), EphemerisSeries::from_samples(samples));
    }

    /// Load a body from a source. On failure the body's series is left empty,
    /// the failure is logged, and the error is handed back for reporting.
    pub fn load_from(
        &mut self,
        source: &dyn SampleSource,
        body_id: &str,
    ) -> Result<LoadCount, EngineError> {
        match source.fetch(body_id) {
            Ok(batch) => {
                if batch.skipped > 0 {
                    log::warn!("body {body_id}: skipped {} malformed rows", batch.skipped);
                }
                let skipped = batch.skipped;
                self.load(body_id, batch.samples);
                Ok(LoadCount {
                    samples: self.sample_count(body_id),
                    skipped,
                })
            }
            Err(e) => {
                log::error!("data source unavailable for body {body_id}: {e}");
                self.series
                    .insert(body_id.to_string(), EphemerisSeries::default());
                Err(e)
            }
        }
    }

    /// The stored sample for an exact date key.
    pub fn position_at(&self, body_id: &str, date_key: &str) -> Result<Vec3, EngineError> {
        self.series
            .get(body_id)
            .and_then(|s| s.get(date_key))
            .ok_or_else(|| EngineError::DateNotFound {
                body: body_id.to_string(),
                date: date_key.to_string(),
            })
    }

    /// All keys of a body in chronological order. Empty for unknown bodies.
    pub fn all_dates(&self, body_id: &str) -> Vec<String> {
        self.series
            .get(body_id)
            .map(|s| s.dates().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn series(&self, body_id: &str) -> Option<&EphemerisSeries> {
        self.series.get(body_id)
    }

    pub fn sample_count(&self, body_id: &str) -> usize {
        self.series.get(body_id).map_or(0, EphemerisSeries::len)
    }

    /// Drop every series (data source changed).
    pub fn clear(&mut self) {
        self.series.clear();
    }
}
