use orrery_engine::{
    BodyFacts, EngineConfig, EngineError, EphemerisEngine, LoadReport,
    MemorySource, Scene, TransformRecord,
};

/// Owns the engine, the scene it animates, and the flat transform buffer
/// the host reads after every call.
///
/// The browser cannot read files, so tables are pushed in as text with
/// `load_table` and only parsed into the engine on `load_all`.
pub struct EngineRunner {
    engine: EphemerisEngine,
    source: MemorySource,
    scene: Scene,
    /// One record per body, in body index order.
    transforms: Vec<TransformRecord>,
}

impl EngineRunner {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let engine = EphemerisEngine::new(config)?;
        let scene = Scene::from_catalog(engine.catalog());
        let mut runner = Self {
            engine,
            source: MemorySource::new(),
            scene,
            transforms: Vec::new(),
        };
        runner.refresh();
        Ok(runner)
    }

    /// Build from a JSON config. An empty string means defaults.
    pub fn from_json(config_json: &str) -> Result<Self, EngineError> {
        let config = if config_json.trim().is_empty() {
            EngineConfig::default()
        } else {
            EngineConfig::from_json(config_json)?
        };
        Self::new(config)
    }

    /// Stage one body's ephemeris table. Returns the parsed sample count.
    pub fn load_table(&mut self, body_id: &str, text: &str) -> Result<usize, EngineError> {
        if self.engine.catalog().index_of(body_id).is_none() {
            return Err(EngineError::UnknownBody(body_id.to_string()));
        }
        self.source.insert_table(body_id, text)
    }

    /// Load every staged table into the engine and apply orientations.
    pub fn load_all(&mut self) -> LoadReport {
        let report = self.engine.load_all(&self.source);
        self.engine.apply_orientations(&mut self.scene);
        self.refresh();
        report
    }

    /// Take axial tilts from a fact sheet JSON array.
    pub fn load_facts(&mut self, json: &str) -> Result<usize, EngineError> {
        let facts = BodyFacts::list_from_json(json)?;
        let updated = self.engine.apply_facts(&facts);
        self.engine.apply_orientations(&mut self.scene);
        self.refresh();
        Ok(updated)
    }

    /// Returns how many bodies had no sample for `date`.
    pub fn set_target_date(&mut self, date: &str) -> usize {
        let missing = self.engine.set_target_date_and_apply(date, &mut self.scene);
        self.refresh();
        missing.len()
    }

    /// Returns how many bodies have samples in the window.
    pub fn select_window(&mut self, start: &str, end: &str) -> Result<usize, EngineError> {
        let empty = self.engine.select_window(start, end)?;
        Ok(self.engine.catalog().len() - empty.len())
    }

    pub fn set_duration(&mut self, secs: f32) -> Result<(), EngineError> {
        self.engine.set_total_duration(secs)
    }

    pub fn start(&mut self) {
        self.engine.start(&mut self.scene);
        self.refresh();
    }

    pub fn reset(&mut self) {
        self.engine.reset(&mut self.scene);
        self.refresh();
    }

    /// One frame. Returns true on the frame playback finishes.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.engine.is_animating() {
            return false;
        }
        let finished = self.engine.tick(dt, &mut self.scene);
        self.refresh();
        finished
    }

    fn refresh(&mut self) {
        self.transforms.clear();
        self.transforms.extend(self.scene.iter().map(|b| b.record()));
    }

    // ---- Accessors ----

    pub fn engine(&self) -> &EphemerisEngine {
        &self.engine
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn transforms(&self) -> &[TransformRecord] {
        &self.transforms
    }

    pub fn transforms_ptr(&self) -> *const f32 {
        self.transforms.as_ptr() as *const f32
    }

    pub fn body_count(&self) -> u32 {
        self.transforms.len() as u32
    }

    pub fn body_ids(&self) -> Vec<String> {
        self.engine.catalog().iter().map(|(_, b)| b.id.clone()).collect()
    }

    /// Orbit trace flattened to xyz triples.
    pub fn orbit_trace(&self, body_id: &str) -> Vec<f32> {
        self.engine
            .orbit_trace(body_id)
            .iter()
            .flat_map(|p| p.to_array())
            .collect()
    }

    pub fn progress(&self) -> f32 {
        self.engine.progress()
    }

    pub fn elapsed_time(&self) -> f32 {
        self.engine.elapsed_time()
    }

    pub fn is_animating(&self) -> bool {
        self.engine.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EARTH: &str = "\
Date__(UT)__HR:MN:SC.fff, X, Y, Z
A.D. 2023-Jan-01 00:00:00.0000 TDB, 1.0, 0.0, 0.0
A.D. 2023-Apr-01 00:00:00.0000 TDB, 0.0, 0.0, -1.0
A.D. 2023-Jul-01 00:00:00.0000 TDB, -1.0, 0.0, 0.0
";

    fn runner() -> EngineRunner {
        let mut r = EngineRunner::from_json(r#"{ "total_duration": 10.0 }"#).unwrap();
        assert_eq!(r.load_table("399", EARTH).unwrap(), 3);
        r.load_all();
        r
    }

    #[test]
    fn buffer_has_one_record_per_body() {
        let r = EngineRunner::from_json("").unwrap();
        assert_eq!(r.body_count(), 9);
        let sun = r.transforms()[0];
        assert_eq!((sun.px, sun.py, sun.pz), (0.0, 0.0, 0.0));
        assert_eq!(sun.qw, 1.0);
    }

    #[test]
    fn unknown_body_tables_are_rejected() {
        let mut r = EngineRunner::from_json("").unwrap();
        assert_eq!(
            r.load_table("-31", EARTH).unwrap_err(),
            EngineError::UnknownBody("-31".into())
        );
    }

    #[test]
    fn playback_updates_buffer() {
        let mut r = runner();
        assert_eq!(r.select_window("2023-01-01", "2023-07-01").unwrap(), 1);
        r.start();
        assert_eq!(r.transforms()[3].px, 1.0);
        assert!(!r.tick(5.0));
        assert_eq!(r.progress(), 0.5);
        assert!((r.transforms()[3].pz + 1.0).abs() < 1e-6);
        assert!(r.tick(5.0));
        assert_eq!(r.transforms()[3].px, -1.0);
        assert!(!r.is_animating());
        assert!(!r.tick(1.0));
    }

    #[test]
    fn target_date_uses_store_keys() {
        let mut r = runner();
        let missing = r.set_target_date("A.D. 2023-Apr-01 00:00:00.0000 TDB");
        assert_eq!(missing, 8);
        let rec = r.transforms()[3];
        assert_eq!((rec.px, rec.py, rec.pz), (0.0, 0.0, -1.0));
    }

    #[test]
    fn orientation_lands_in_buffer_after_load() {
        let r = runner();
        let rec = r.transforms()[3];
        let expected = r.engine().rotation("399").unwrap();
        assert_eq!((rec.qx, rec.qy, rec.qz, rec.qw), (expected.x, expected.y, expected.z, expected.w));
    }

    #[test]
    fn orbit_trace_is_flat_xyz() {
        let r = runner();
        assert_eq!(
            r.orbit_trace("399"),
            vec![1.0, 0.0, 0.0, 0.0, 0.0, -1.0, -1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn duration_is_validated() {
        let mut r = runner();
        assert!(r.set_duration(-2.0).is_err());
        r.set_duration(2.0).unwrap();
        r.select_window("2023-01-01", "2023-12-31").unwrap();
        r.start();
        assert!(r.tick(2.0));
    }
}
