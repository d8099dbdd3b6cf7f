// timeline/playback.rs
//
// Playback state machine. Advances one global clock and moves every body
// along its path so that all of them finish together after `total_duration`.
//
// Usage:
//   let mut playback = Playback::new(body_count, 20.0, Pacing::TimeFraction)?;
//   playback.set_paths(selection.paths);
//   playback.start(&mut scene);
//   playback.tick(dt, &mut scene);  // once per frame

use glam::Quat;
use crate::api::config::validate_duration;
use crate::api::error::EngineError;
use crate::api::types::BodyIndex;
use crate::core::scene::Scene;
use crate::timeline::path::{Pacing, PlaybackPath};

/// Machine state. A finished run is `Idle` with every path consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// Everything the engine keeps per body, indexed by dense body index.
#[derive(Debug, Clone, Default)]
pub struct BodyTrack {
    /// Current playback path (empty until a window is selected).
    pub path: PlaybackPath,
    /// Whether the body is still moving in the current run.
    pub active: bool,
    /// Precomputed display orientation (identity until solved).
    pub rotation: Quat,
}

/// Global clock plus one track per body.
#[derive(Debug)]
pub struct Playback {
    tracks: Vec<BodyTrack>,
    elapsed: f32,
    total_duration: f32,
    pacing: Pacing,
    state: PlaybackState,
}

impl Playback {
    pub fn new(body_count: usize, total_duration: f32, pacing: Pacing) -> Result<Self, EngineError> {
        validate_duration(total_duration)?;
        Ok(Self {
            tracks: vec![BodyTrack::default(); body_count],
            elapsed: 0.0,
            total_duration,
            pacing,
            state: PlaybackState::Idle,
        })
    }

    /// Replace every path. Stops any run in progress without moving bodies;
    /// bodies beyond `paths.len()` get empty paths.
    pub fn set_paths(&mut self, paths: Vec<PlaybackPath>) {
        if self.state == PlaybackState::Playing {
            log::info!("new window selected mid-playback; stopping");
        }
        let mut paths = paths.into_iter();
        for track in &mut self.tracks {
            track.path = paths.next().unwrap_or_default();
            track.active = false;
        }
        self.elapsed = 0.0;
        self.state = PlaybackState::Idle;
    }

    /// Set a body's cached orientation.
    pub fn set_rotation(&mut self, index: BodyIndex, rotation: Quat) {
        if let Some(track) = self.tracks.get_mut(index.0) {
            track.rotation = rotation;
        }
    }

    pub fn set_total_duration(&mut self, secs: f32) -> Result<(), EngineError> {
        validate_duration(secs)?;
        self.total_duration = secs;
        Ok(())
    }

    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }

    /// Begin a run from any state: clock to zero, bodies with a path placed
    /// at its first sample, bodies with two or more samples activated.
    pub fn start(&mut self, scene: &mut Scene) {
        self.elapsed = 0.0;
        self.state = PlaybackState::Playing;
        for (i, track) in self.tracks.iter_mut().enumerate() {
            track.active = track.path.is_animatable();
            if let Some(first) = track.path.first() {
                place(scene, i, first, track.rotation);
            }
        }
        log::info!(
            "playback started: {} bodies over {:.1}s",
            self.active_count(),
            self.total_duration
        );
    }

    /// Stop from any state: clock to zero, bodies with a path back at their
    /// first sample with their orientation reapplied.
    pub fn reset(&mut self, scene: &mut Scene) {
        self.elapsed = 0.0;
        self.state = PlaybackState::Idle;
        for (i, track) in self.tracks.iter_mut().enumerate() {
            track.active = false;
            if let Some(first) = track.path.first() {
                place(scene, i, first, track.rotation);
            }
        }
    }

    /// Advance the clock and move every active body.
    /// Returns true on the tick that completes the run.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }

        self.elapsed += dt.max(0.0);
        let t = self.progress();

        for (i, track) in self.tracks.iter_mut().enumerate() {
            if !track.active {
                continue;
            }
            let cursor = track.path.locate(t, self.pacing);
            if cursor.segment + 1 >= track.path.len() {
                track.active = false;
            }
            if let (Some(pos), Some(body)) = (track.path.sample(cursor), scene.get_mut(BodyIndex(i))) {
                body.pos = pos;
            }
        }

        if t >= 1.0 {
            self.state = PlaybackState::Idle;
            for track in &mut self.tracks {
                track.active = false;
            }
            log::info!("playback finished after {:.2}s", self.elapsed);
            return true;
        }
        false
    }

    /// Normalized progress `elapsed / total_duration`, clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.total_duration).clamp(0.0, 1.0)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn track(&self, index: BodyIndex) -> Option<&BodyTrack> {
        self.tracks.get(index.0)
    }

    pub fn tracks(&self) -> &[BodyTrack] {
        &self.tracks
    }

    /// Number of bodies still moving.
    pub fn active_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.active).count()
    }
}

fn place(scene: &mut Scene, index: usize, pos: glam::Vec3, rotation: Quat) {
    match scene.get_mut(BodyIndex(index)) {
        Some(body) => {
            body.pos = pos;
            body.rotation = rotation;
        }
        None => log::warn!("no scene transform for body index {index}"),
    }
}
