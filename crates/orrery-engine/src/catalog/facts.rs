use serde::{Deserialize, Serialize};
use crate::api::error::EngineError;

/// Physical facts for one body, as published in the planetary fact sheet.
/// Field names follow the `planet_data.json` layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyFacts {
    pub name: String,
    pub mass_10_24_kg: f32,
    pub diameter_km: u32,
    pub density_kg_m3: u32,
    pub gravity_m_s2: f32,
    pub escape_velocity_km_s: f32,
    pub rotation_period_hours: f32,
    pub length_of_day_hours: f32,
    pub distance_from_sun_10_6_km: f32,
    pub orbital_period_days: f32,
    pub orbital_velocity_km_s: f32,
    pub orbital_inclination_deg: f32,
    pub obliquity_deg: f32,
    pub mean_temperature_c: i32,
    pub number_of_moons: u32,
}

impl BodyFacts {
    /// Parse a bare JSON array of fact records.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}
