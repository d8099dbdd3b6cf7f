//! The fixed set of bodies the engine manages.
//!
//! The position of a body in the catalog is its dense scene index, so the
//! identifier → index mapping is total by construction and kept injective
//! by rejecting duplicate identifiers.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::api::error::EngineError;
use crate::api::types::BodyIndex;
use crate::catalog::facts::BodyFacts;

/// Describes one managed body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Stable external identifier (Horizons command id, e.g. "399").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Axial tilt in degrees about the canonical right axis.
    #[serde(default)]
    pub axial_tilt_deg: f32,
}

impl BodyDesc {
    pub fn new(id: impl Into<String>, name: impl Into<String>, axial_tilt_deg: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            axial_tilt_deg,
        }
    }
}

// ── Built-in solar system ────────────────────────────────────────────

/// (id, name, obliquity in degrees). Sun tilt is relative to the ecliptic.
const SOLAR_SYSTEM: [(&str, &str, f32); 9] = [
    ("10", "Sun", 7.25),
    ("199", "Mercury", 0.034),
    ("299", "Venus", 177.4),
    ("399", "Earth", 23.44),
    ("499", "Mars", 25.19),
    ("599", "Jupiter", 3.13),
    ("699", "Saturn", 26.73),
    ("799", "Uranus", 97.77),
    ("899", "Neptune", 28.32),
];

/// Ordered registry of bodies with O(1) id lookup.
#[derive(Debug, Clone)]
pub struct BodyCatalog {
    bodies: Vec<BodyDesc>,
    by_id: HashMap<String, BodyIndex>,
}

impl BodyCatalog {
    /// Build a catalog; index order follows `bodies`.
    pub fn new(bodies: Vec<BodyDesc>) -> Result<Self, EngineError> {
        let mut by_id = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            if by_id.insert(body.id.clone(), BodyIndex(i)).is_some() {
                return Err(EngineError::DuplicateBody(body.id.clone()));
            }
        }
        Ok(Self { bodies, by_id })
    }

    /// The Sun and the eight planets, indexed 0 (Sun) through 8 (Neptune).
    pub fn solar_system() -> Self {
        let bodies: Vec<BodyDesc> = SOLAR_SYSTEM
            .iter()
            .map(|&(id, name, tilt)| BodyDesc::new(id, name, tilt))
            .collect();
        let by_id = bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id.clone(), BodyIndex(i)))
            .collect();
        Self { bodies, by_id }
    }

    /// Dense index of a body identifier.
    pub fn index_of(&self, id: &str) -> Option<BodyIndex> {
        self.by_id.get(id).copied()
    }

    /// Look up a body by identifier.
    pub fn get(&self, id: &str) -> Option<&BodyDesc> {
        self.index_of(id).map(|idx| &self.bodies[idx.0])
    }

    /// Look up a body by dense index.
    pub fn at(&self, index: BodyIndex) -> Option<&BodyDesc> {
        self.bodies.get(index.0)
    }

    /// Iterate bodies in index order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyIndex, &BodyDesc)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyIndex(i), b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Overwrite axial tilts with each matching record's obliquity.
    /// Names match case-insensitively. Returns how many bodies were updated.
    pub fn apply_facts(&mut self, facts: &[BodyFacts]) -> usize {
        let mut updated = 0;
        for body in &mut self.bodies {
            if let Some(f) = facts.iter().find(|f| f.name.eq_ignore_ascii_case(&body.name)) {
                body.axial_tilt_deg = f.obliquity_deg;
                updated += 1;
            }
        }
        updated
    }
}

impl Default for BodyCatalog {
    fn default() -> Self {
        Self::solar_system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_system_mapping() {
        let catalog = BodyCatalog::solar_system();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.index_of("10"), Some(BodyIndex(0)));
        assert_eq!(catalog.index_of("399"), Some(BodyIndex(3)));
        assert_eq!(catalog.index_of("899"), Some(BodyIndex(8)));
        assert_eq!(catalog.get("499").unwrap().name, "Mars");
        assert!(catalog.index_of("999").is_none());
    }

    #[test]
    fn mapping_is_injective() {
        let catalog = BodyCatalog::solar_system();
        for (idx, body) in catalog.iter() {
            assert_eq!(catalog.index_of(&body.id), Some(idx));
        }
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = BodyCatalog::new(vec![
            BodyDesc::new("399", "Earth", 23.44),
            BodyDesc::new("399", "Earth again", 0.0),
        ])
        .unwrap_err();
        assert_eq!(err, EngineError::DuplicateBody("399".into()));
    }

    #[test]
    fn facts_override_tilt_by_name() {
        let mut catalog = BodyCatalog::solar_system();
        let facts = vec![BodyFacts {
            name: "EARTH".into(),
            obliquity_deg: 23.0,
            ..BodyFacts::default()
        }];
        assert_eq!(catalog.apply_facts(&facts), 1);
        assert_eq!(catalog.get("399").unwrap().axial_tilt_deg, 23.0);
        assert_eq!(catalog.get("499").unwrap().axial_tilt_deg, 25.19);
    }
}
