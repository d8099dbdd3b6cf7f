//! Static display rotation per body, from its orbit plane.
//!
//! Pure math over the first and last sampled positions. Computed once per
//! load, never per frame; this does not model spin.

use glam::{Quat, Vec3};
use crate::api::error::EngineError;
use crate::ephemeris::store::EphemerisSeries;

/// Endpoints closer to collinear than this (sine of the angle between them)
/// leave the plane undefined.
const MIN_PLANE_SINE: f32 = 1e-6;

/// Canonical "up" axis of a body model.
pub const UP: Vec3 = Vec3::Y;
/// Canonical "right" axis; axial tilt rotates about it.
pub const RIGHT: Vec3 = Vec3::X;

/// Unit normal of the plane spanned by two origin-relative positions.
/// `None` when either is zero or they are collinear with the origin.
pub fn orbit_normal(first: Vec3, last: Vec3) -> Option<Vec3> {
    let scale = first.length() * last.length();
    if !scale.is_finite() || scale == 0.0 {
        return None;
    }
    let cross = first.cross(last);
    if cross.length() <= MIN_PLANE_SINE * scale {
        return None;
    }
    Some(cross.normalize())
}

/// Rotation taking `UP` onto the orbit normal, composed with a tilt of
/// `axial_tilt_deg` about `RIGHT`. Identity when the plane is undefined.
pub fn compute_rotation(first: Vec3, last: Vec3, axial_tilt_deg: f32) -> Quat {
    match orbit_normal(first, last) {
        Some(normal) => plane_rotation(normal, axial_tilt_deg),
        None => Quat::IDENTITY,
    }
}

fn plane_rotation(normal: Vec3, axial_tilt_deg: f32) -> Quat {
    let align = Quat::from_rotation_arc(UP, normal);
    let tilt = Quat::from_axis_angle(RIGHT, axial_tilt_deg.to_radians());
    (align * tilt).normalize()
}

/// Rotation for a whole series, from its chronologically first and last
/// samples. `DegenerateGeometry` when fewer than two samples exist or the
/// endpoints do not span a plane; callers fall back to identity.
pub fn series_rotation(
    body_id: &str,
    series: &EphemerisSeries,
    axial_tilt_deg: f32,
) -> Result<Quat, EngineError> {
    let degenerate = || EngineError::DegenerateGeometry {
        body: body_id.to_string(),
    };
    if series.len() < 2 {
        return Err(degenerate());
    }
    let (first, last) = match (series.first(), series.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(degenerate()),
    };
    let normal = orbit_normal(first, last).ok_or_else(degenerate)?;
    Ok(plane_rotation(normal, axial_tilt_deg))
}
