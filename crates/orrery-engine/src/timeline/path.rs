// timeline/path.rs
//
// Playback paths and the mapping from normalized time to a point on them.
// Knows nothing about the store or scene, only positions.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How normalized playback time `t` maps onto a body's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// `t` spreads evenly over samples: each segment takes the same time, so
    /// apparent speed grows with the number of samples, not with distance.
    #[default]
    TimeFraction,
    /// Constant speed along the path: `path length / total duration`.
    /// Legacy policy; every body still arrives at its last sample at `t = 1`.
    ArcLength,
}

/// Where on a path a given `t` lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCursor {
    /// Segment start index. Equal to the last index once the path is done.
    pub segment: usize,
    /// Fraction of the way to `segment + 1`, in `[0, 1)`.
    pub fraction: f32,
}

/// Date-ordered positions a body moves through during playback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackPath {
    positions: Vec<Vec3>,
    /// Arc length from the first sample to each sample.
    cumulative: Vec<f32>,
}

impl PlaybackPath {
    pub fn new(positions: Vec<Vec3>) -> Self {
        let mut cumulative = Vec::with_capacity(positions.len());
        let mut total = 0.0;
        for (i, p) in positions.iter().enumerate() {
            if i > 0 {
                total += p.distance(positions[i - 1]);
            }
            cumulative.push(total);
        }
        Self { positions, cumulative }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    pub fn first(&self) -> Option<Vec3> {
        self.positions.first().copied()
    }

    pub fn last(&self) -> Option<Vec3> {
        self.positions.last().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Paths need two samples to be interpolated.
    pub fn is_animatable(&self) -> bool {
        self.positions.len() >= 2
    }

    /// Sum of segment lengths.
    pub fn total_length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Map `t` (clamped to `[0, 1]`) to a segment and fraction.
    /// Call only on animatable paths.
    pub fn locate(&self, t: f32, pacing: Pacing) -> PathCursor {
        let last = self.positions.len().saturating_sub(1);
        let t = t.clamp(0.0, 1.0);
        let total = self.total_length();

        match pacing {
            Pacing::ArcLength if total.is_finite() && total > 0.0 => {
                if t >= 1.0 {
                    return PathCursor { segment: last, fraction: 0.0 };
                }
                let d = t * total;
                // Last sample whose arc length does not exceed d; zero-length
                // segments are stepped over.
                let segment = self.cumulative.partition_point(|&c| c <= d).saturating_sub(1);
                if segment >= last {
                    return PathCursor { segment: last, fraction: 0.0 };
                }
                let len = self.cumulative[segment + 1] - self.cumulative[segment];
                let fraction = if len > 0.0 {
                    ((d - self.cumulative[segment]) / len).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                PathCursor { segment, fraction }
            }
            _ => {
                let s = t * last as f32;
                let segment = (s.floor() as usize).min(last);
                let fraction = if segment == last { 0.0 } else { s - segment as f32 };
                PathCursor { segment, fraction }
            }
        }
    }

    /// Position at a cursor: the final sample exactly once the path is done,
    /// otherwise a linear blend of the segment endpoints.
    pub fn sample(&self, cursor: PathCursor) -> Option<Vec3> {
        let a = self.get(cursor.segment)?;
        match self.get(cursor.segment + 1) {
            Some(b) => Some(a.lerp(b, cursor.fraction)),
            None => Some(a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> PlaybackPath {
        // Segment lengths 1, 3: uneven on purpose.
        PlaybackPath::new(vec![Vec3::ZERO, Vec3::X, Vec3::X * 4.0])
    }

    #[test]
    fn time_fraction_endpoints() {
        let path = straight();
        assert_eq!(path.locate(0.0, Pacing::TimeFraction), PathCursor { segment: 0, fraction: 0.0 });
        let end = path.locate(1.0, Pacing::TimeFraction);
        assert_eq!(end.segment, 2);
        assert_eq!(path.sample(end), Some(Vec3::X * 4.0));
    }

    #[test]
    fn time_fraction_splits_by_sample_count() {
        let path = straight();
        let c = path.locate(0.5, Pacing::TimeFraction);
        assert_eq!(c.segment, 1);
        assert!(c.fraction.abs() < 1e-6);
        let c = path.locate(0.25, Pacing::TimeFraction);
        assert_eq!(c.segment, 0);
        assert!((path.sample(c).unwrap() - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn arc_length_splits_by_distance() {
        let path = straight();
        assert_eq!(path.total_length(), 4.0);
        // Halfway by distance is x = 2, inside the second segment.
        let c = path.locate(0.5, Pacing::ArcLength);
        assert_eq!(c.segment, 1);
        assert!((path.sample(c).unwrap() - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(path.sample(path.locate(1.0, Pacing::ArcLength)), Some(Vec3::X * 4.0));
    }

    #[test]
    fn arc_length_skips_zero_length_segments() {
        let path = PlaybackPath::new(vec![Vec3::ZERO, Vec3::ZERO, Vec3::X]);
        let c = path.locate(0.5, Pacing::ArcLength);
        assert_eq!(c.segment, 1);
        assert!((c.fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stationary_path_falls_back_to_time_fraction() {
        let path = PlaybackPath::new(vec![Vec3::ONE, Vec3::ONE, Vec3::ONE]);
        assert_eq!(
            path.locate(0.5, Pacing::ArcLength),
            path.locate(0.5, Pacing::TimeFraction)
        );
    }

    #[test]
    fn segment_index_is_monotonic() {
        let path = PlaybackPath::new((0..17).map(|i| Vec3::new(i as f32, (i * i) as f32, 0.0)).collect());
        for pacing in [Pacing::TimeFraction, Pacing::ArcLength] {
            let mut prev = 0;
            for step in 0..=1000 {
                let c = path.locate(step as f32 / 1000.0, pacing);
                assert!(c.segment >= prev, "{pacing:?} went back at step {step}");
                assert!((0.0..=1.0).contains(&c.fraction));
                prev = c.segment;
            }
            assert_eq!(prev, path.len() - 1);
        }
    }

    #[test]
    fn out_of_range_t_is_clamped() {
        let path = straight();
        assert_eq!(path.locate(-3.0, Pacing::TimeFraction).segment, 0);
        assert_eq!(path.locate(7.0, Pacing::ArcLength).segment, 2);
    }
}
