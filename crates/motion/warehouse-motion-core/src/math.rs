//! Small vector type and interpolation helpers:
//! - lerp_f32 / lerp_vec3 (component-wise)
//! - ease_in_out_quad (placement/retrieval timing)
//! - round_to_pitch (sector centre snapping)

use serde::{Deserialize, Serialize};

/// 3D point in scene units. `x` is lateral, `y` is height, `z` is depth.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same point moved vertically by `dy`.
    #[inline]
    pub fn raised(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3 {
        x: lerp_f32(a.x, b.x, t),
        y: lerp_f32(a.y, b.y, t),
        z: lerp_f32(a.z, b.z, t),
    }
}

/// Quadratic ease-in/out on [0,1].
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

/// Snap `value` to the nearest multiple of `pitch`. Halves round toward +inf,
/// so -30 with pitch 20 snaps to -20 rather than -40.
#[inline]
pub fn round_to_pitch(value: f32, pitch: f32) -> f32 {
    if pitch <= 0.0 {
        return value;
    }
    (value / pitch + 0.5).floor() * pitch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_hits_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_quad(0.25) - 0.125).abs() < 1e-6);
        assert!((ease_in_out_quad(0.75) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn round_to_pitch_matches_sector_centres() {
        assert_eq!(round_to_pitch(-20.0, 20.0), -20.0);
        assert_eq!(round_to_pitch(-26.8, 20.0), -20.0);
        assert_eq!(round_to_pitch(33.2, 20.0), 40.0);
        assert_eq!(round_to_pitch(-30.0, 20.0), -20.0);
        assert_eq!(round_to_pitch(5.0, 0.0), 5.0);
    }
}
