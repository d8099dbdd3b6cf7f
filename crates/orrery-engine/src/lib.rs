pub mod api;
pub mod core;
pub mod components;
pub mod catalog;
pub mod ephemeris;
pub mod orientation;
pub mod timeline;
pub mod engine;

// Re-export key types at crate root for convenience
pub use api::config::EngineConfig;
pub use api::error::EngineError;
pub use api::types::{BodyIndex, Sample, TransformRecord};
pub use catalog::{BodyCatalog, BodyDesc, BodyFacts};
pub use components::body::BodyTransform;
pub use core::scene::Scene;
pub use engine::{EphemerisEngine, LoadReport};
pub use ephemeris::{
    canonical_date, parse_table, DirectorySource, EphemerisSeries, EphemerisStore,
    MemorySource, SampleBatch, SampleSource,
};
pub use orientation::{compute_rotation, orbit_normal, series_rotation};
pub use timeline::{
    Pacing, PlaybackPath, Playback, PlaybackState, Window, WindowSelection,
};
