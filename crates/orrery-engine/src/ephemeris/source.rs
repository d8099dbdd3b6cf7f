//! Where a body's ephemeris samples come from.
//!
//! The engine never fetches or parses upstream service responses; a source
//! hands it samples already persisted as tables (on disk or in memory).

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use crate::api::config::EngineConfig;
use crate::api::error::EngineError;
use crate::api::types::Sample;
use crate::ephemeris::table::{parse_table, SampleBatch};

/// Supplies the full sample sequence for a body.
pub trait SampleSource {
    /// Samples for `body_id`. `MissingSource` when the body has no data here.
    fn fetch(&self, body_id: &str) -> Result<SampleBatch, EngineError>;
}

/// One table file per body inside a data directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    file_template: String,
}

impl DirectorySource {
    /// `file_template` names each file; `{id}` becomes the body identifier.
    pub fn new(dir: impl Into<PathBuf>, file_template: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_template: file_template.into(),
        }
    }

    /// Directory source described by the config, if it names a data directory.
    pub fn from_config(config: &EngineConfig) -> Option<Self> {
        config
            .data_dir
            .as_ref()
            .map(|dir| Self::new(dir.clone(), config.file_template.clone()))
    }

    /// Full path of a body's table.
    pub fn path_for(&self, body_id: &str) -> PathBuf {
        self.dir.join(self.file_template.replace("{id}", body_id))
    }
}

impl SampleSource for DirectorySource {
    fn fetch(&self, body_id: &str) -> Result<SampleBatch, EngineError> {
        let path = self.path_for(body_id);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EngineError::MissingSource {
                    body: body_id.to_string(),
                    reason: format!("{} not found", path.display()),
                });
            }
            Err(e) => return Err(e.into()),
        };
        parse_table(&text)
    }
}

/// Samples registered in memory, keyed by body identifier.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    batches: HashMap<String, SampleBatch>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register already-parsed samples for a body, replacing any previous ones.
    pub fn insert_samples(&mut self, body_id: impl Into<String>, samples: Vec<Sample>) {
        self.batches
            .insert(body_id.into(), SampleBatch { samples, skipped: 0 });
    }

    /// Parse and register a table for a body. Returns the number of samples.
    pub fn insert_table(&mut self, body_id: impl Into<String>, text: &str) -> Result<usize, EngineError> {
        let batch = parse_table(text)?;
        let count = batch.samples.len();
        self.batches.insert(body_id.into(), batch);
        Ok(count)
    }

    /// Builder form of `insert_samples`.
    pub fn with_samples(mut self, body_id: impl Into<String>, samples: Vec<Sample>) -> Self {
        self.insert_samples(body_id, samples);
        self
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

impl SampleSource for MemorySource {
    fn fetch(&self, body_id: &str) -> Result<SampleBatch, EngineError> {
        self.batches
            .get(body_id)
            .cloned()
            .ok_or_else(|| EngineError::MissingSource {
                body: body_id.to_string(),
                reason: "no samples registered".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn directory_source_reads_tables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("planet_399_positions.txt"),
            "Date, X, Y, Z\n2023-01-01, 1, 0, 0\n2023-01-02, 0, 1, 0\n",
        )
        .unwrap();

        let source = DirectorySource::new(dir.path(), "planet_{id}_positions.txt");
        let batch = source.fetch("399").unwrap();
        assert_eq!(batch.samples.len(), 2);
        assert_eq!(batch.samples[1].position, Vec3::Y);
    }

    #[test]
    fn directory_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path(), "planet_{id}_positions.txt");
        let err = source.fetch("499").unwrap_err();
        assert!(matches!(err, EngineError::MissingSource { ref body, .. } if body == "499"));
    }

    #[test]
    fn directory_source_from_config() {
        let config = EngineConfig {
            data_dir: Some(PathBuf::from("PlanetData")),
            ..EngineConfig::default()
        };
        let source = DirectorySource::from_config(&config).unwrap();
        assert_eq!(
            source.path_for("10"),
            PathBuf::from("PlanetData").join("planet_10_positions.txt")
        );
        assert!(DirectorySource::from_config(&EngineConfig::default()).is_none());
    }

    #[test]
    fn memory_source_tables_and_samples() {
        let mut source = MemorySource::new()
            .with_samples("10", vec![Sample::new("2023-01-01", Vec3::ZERO)]);
        let n = source
            .insert_table("399", "Date, X, Y, Z\n2023-01-01, 1, 2, 3\nbad row\n")
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(source.len(), 2);
        assert_eq!(source.fetch("399").unwrap().skipped, 1);
        assert_eq!(source.fetch("10").unwrap().samples.len(), 1);
        assert!(matches!(
            source.fetch("599"),
            Err(EngineError::MissingSource { .. })
        ));
    }
}
