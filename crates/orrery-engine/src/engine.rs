use glam::{Quat, Vec3};
use crate::api::config::EngineConfig;
use crate::api::error::EngineError;
use crate::api::types::{BodyIndex, Sample};
use crate::catalog::bodies::BodyCatalog;
use crate::catalog::facts::BodyFacts;
use crate::core::scene::Scene;
use crate::ephemeris::source::SampleSource;
use crate::ephemeris::store::EphemerisStore;
use crate::orientation::series_rotation;
use crate::timeline::path::{Pacing, PlaybackPath};
use crate::timeline::playback::{Playback, PlaybackState};
use crate::timeline::window::{select_window, Window};

/// Outcome of loading every catalog body from a source.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Bodies whose series now holds at least one sample.
    pub loaded: Vec<String>,
    /// Bodies left empty, with the reason (usually `MissingSource`).
    pub failed: Vec<EngineError>,
    /// Loaded bodies whose orientation fell back to identity.
    pub degenerate: Vec<EngineError>,
    /// Malformed table rows dropped across all bodies.
    pub skipped_rows: usize,
}

/// The ephemeris timeline engine.
///
/// Owns the sample store, per-body paths and orientations, and the playback
/// clock. The host owns the `Scene` and lends it to every call that moves
/// bodies; nothing here creates or destroys transforms.
pub struct EphemerisEngine {
    config: EngineConfig,
    catalog: BodyCatalog,
    store: EphemerisStore,
    playback: Playback,
    window: Option<Window>,
}

impl EphemerisEngine {
    /// Engine over the configured bodies, or the built-in solar system.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let catalog = match &config.bodies {
            Some(bodies) => BodyCatalog::new(bodies.clone())?,
            None => BodyCatalog::solar_system(),
        };
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: EngineConfig, catalog: BodyCatalog) -> Result<Self, EngineError> {
        config.validate()?;
        let playback = Playback::new(catalog.len(), config.total_duration, config.pacing)?;
        Ok(Self {
            config,
            catalog,
            store: EphemerisStore::new(),
            playback,
            window: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &EphemerisStore {
        &self.store
    }

    // -- Loading --

    /// Load every catalog body from `source`, in index order. A body whose
    /// data is missing stays empty and is skipped by everything after; the
    /// rest load normally. Any previous window is discarded.
    pub fn load_all(&mut self, source: &dyn SampleSource) -> LoadReport {
        let mut report = LoadReport::default();
        self.store.clear();

        let ids: Vec<String> = self.catalog.iter().map(|(_, b)| b.id.clone()).collect();
        for id in ids {
            match self.store.load_from(source, &id) {
                Ok(count) => {
                    report.skipped_rows += count.skipped;
                    if count.samples > 0 {
                        report.loaded.push(id);
                    }
                }
                Err(e) => report.failed.push(e),
            }
        }

        // Failed bodies are already reported; their identity fallback is implied.
        report.degenerate = self
            .solve_orientations()
            .into_iter()
            .filter(|e| !report.failed.iter().any(|f| f.body() == e.body()))
            .collect();
        self.clear_window();
        log::info!(
            "loaded {}/{} bodies ({} failed, {} rows skipped)",
            report.loaded.len(),
            self.catalog.len(),
            report.failed.len(),
            report.skipped_rows
        );
        report
    }

    /// Replace one body's series with already-parsed samples and refresh its
    /// orientation. Existing paths are kept until the next window selection.
    pub fn load_body(&mut self, body_id: &str, samples: Vec<Sample>) -> Result<(), EngineError> {
        let index = self
            .catalog
            .index_of(body_id)
            .ok_or_else(|| EngineError::UnknownBody(body_id.to_string()))?;
        self.store.load(body_id, samples);
        if let Err(e) = self.solve_orientation(index) {
            log::debug!("{e}; using identity");
        }
        Ok(())
    }

    /// Take axial tilts from a facts sheet and re-solve orientations.
    /// Returns how many bodies were updated.
    pub fn apply_facts(&mut self, facts: &[BodyFacts]) -> usize {
        let updated = self.catalog.apply_facts(facts);
        if updated > 0 {
            self.solve_orientations();
        }
        updated
    }

    fn solve_orientations(&mut self) -> Vec<EngineError> {
        (0..self.catalog.len())
            .filter_map(|i| self.solve_orientation(BodyIndex(i)).err())
            .collect()
    }

    fn solve_orientation(&mut self, index: BodyIndex) -> Result<(), EngineError> {
        let Some(desc) = self.catalog.at(index) else {
            return Err(EngineError::UnknownBody(format!("#{}", index.0)));
        };
        let result = match self.store.series(&desc.id) {
            Some(series) => series_rotation(&desc.id, series, desc.axial_tilt_deg),
            None => Err(EngineError::DegenerateGeometry { body: desc.id.clone() }),
        };
        self.playback
            .set_rotation(index, *result.as_ref().unwrap_or(&Quat::IDENTITY));
        result.map(|_| ())
    }

    // -- Queries --

    /// Exact-key lookup of a stored sample.
    pub fn position_at(&self, body_id: &str, date_key: &str) -> Result<Vec3, EngineError> {
        self.store.position_at(body_id, date_key)
    }

    /// Every key of a body, chronologically.
    pub fn all_dates(&self, body_id: &str) -> Vec<String> {
        self.store.all_dates(body_id)
    }

    /// Full chronological position history of a body, for orbit lines.
    pub fn orbit_trace(&self, body_id: &str) -> Vec<Vec3> {
        self.store
            .series(body_id)
            .map(|s| s.positions().collect())
            .unwrap_or_default()
    }

    /// Precomputed orientation of a body.
    pub fn rotation(&self, body_id: &str) -> Option<Quat> {
        let index = self.catalog.index_of(body_id)?;
        self.playback.track(index).map(|t| t.rotation)
    }

    // -- Direct positioning --

    /// Move every body to its sample for `target_date` (store key form) and
    /// apply its orientation. Bodies without that exact key keep their
    /// position; one `DateNotFound` per such body is returned.
    pub fn set_target_date_and_apply(&self, target_date: &str, scene: &mut Scene) -> Vec<EngineError> {
        let mut missing = Vec::new();
        for (index, desc) in self.catalog.iter() {
            match self.store.position_at(&desc.id, target_date) {
                Ok(pos) => {
                    if let Some(body) = scene.get_mut(index) {
                        body.pos = pos;
                        body.rotation = self.playback.track(index).map_or(Quat::IDENTITY, |t| t.rotation);
                    } else {
                        log::warn!("no scene transform for body {}", desc.id);
                    }
                }
                Err(e) => {
                    log::warn!("{e}");
                    missing.push(e);
                }
            }
        }
        missing
    }

    /// Write every body's precomputed orientation into the scene.
    pub fn apply_orientations(&self, scene: &mut Scene) {
        for (i, track) in self.playback.tracks().iter().enumerate() {
            if let Some(body) = scene.get_mut(BodyIndex(i)) {
                body.rotation = track.rotation;
            }
        }
    }

    // -- Playback --

    /// Rebuild every body's path for `[start, end]`. Prior paths are dropped
    /// and any run in progress stops. Returns one `EmptyWindow` per body left
    /// out of playback.
    pub fn select_window(&mut self, start: &str, end: &str) -> Result<Vec<EngineError>, EngineError> {
        let selection = select_window(&self.store, &self.catalog, start, end)?;
        log::info!(
            "window [{}, {}]: {}/{} bodies have samples",
            selection.window.start,
            selection.window.end,
            selection.non_empty(),
            self.catalog.len()
        );
        self.playback.set_paths(selection.paths);
        self.window = Some(selection.window);
        Ok(selection.empty)
    }

    fn clear_window(&mut self) {
        self.playback.set_paths(Vec::new());
        self.window = None;
    }

    pub fn start(&mut self, scene: &mut Scene) {
        self.playback.start(scene);
    }

    pub fn reset(&mut self, scene: &mut Scene) {
        self.playback.reset(scene);
    }

    /// Per-frame update. Returns true on the tick that finishes playback.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> bool {
        self.playback.tick(dt, scene)
    }

    pub fn set_total_duration(&mut self, secs: f32) -> Result<(), EngineError> {
        self.playback.set_total_duration(secs)?;
        self.config.total_duration = secs;
        Ok(())
    }

    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.playback.set_pacing(pacing);
        self.config.pacing = pacing;
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    pub fn path(&self, body_id: &str) -> Option<&PlaybackPath> {
        let index = self.catalog.index_of(body_id)?;
        self.playback.track(index).map(|t| &t.path)
    }

    pub fn is_active(&self, body_id: &str) -> bool {
        self.catalog
            .index_of(body_id)
            .and_then(|i| self.playback.track(i))
            .is_some_and(|t| t.active)
    }

    pub fn active_count(&self) -> usize {
        self.playback.active_count()
    }

    pub fn progress(&self) -> f32 {
        self.playback.progress()
    }

    pub fn elapsed_time(&self) -> f32 {
        self.playback.elapsed()
    }

    pub fn is_animating(&self) -> bool {
        self.playback.is_animating()
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }
}
