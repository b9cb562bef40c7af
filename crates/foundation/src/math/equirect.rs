//! Equirectangular panorama coordinates.
//!
//! A panorama texture of `width x height` pixels covers the full sphere:
//! the horizontal axis spans one turn of longitude, the vertical axis spans
//! pole to pole. Pixel `(0, 0)` sits on the north pole at longitude zero.

use std::f64::consts::{PI, TAU};

use super::{Vec2, Vec3};

/// Spherical angles of a panorama pixel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanoramaAngles {
    /// Longitude, negative towards increasing `x` (the dome is seen from inside).
    pub lon_rad: f64,
    /// Latitude above the equator; `+π/2` at `y = 0`, `-π/2` at `y = height`.
    pub lat_rad: f64,
}

impl PanoramaAngles {
    pub fn new(lon_rad: f64, lat_rad: f64) -> Self {
        Self { lon_rad, lat_rad }
    }
}

/// Maps a pixel position on a texture of the given resolution to angles.
///
/// Positions outside `[0, w] x [0, h]` are accepted and wrap or overshoot the
/// poles mathematically. A zero resolution component yields NaN/inf.
pub fn pixel_to_angles(position: Vec2, resolution: Vec2) -> PanoramaAngles {
    PanoramaAngles::new(
        -TAU * position.x / resolution.x,
        PI * (0.5 - position.y / resolution.y),
    )
}

/// Unit direction (y up) for the given panorama angles.
pub fn angles_to_direction(angles: PanoramaAngles) -> Vec3 {
    let horizontal = angles.lat_rad.cos();
    Vec3::new(
        angles.lon_rad.cos() * horizontal,
        angles.lat_rad.sin(),
        angles.lon_rad.sin() * horizontal,
    )
}

/// Places a panorama pixel on a sphere of `radius` centred at the origin.
///
/// The result is always `radius` away from the origin (up to rounding), for
/// any finite pixel position and non-zero resolution.
pub fn pixel_to_sphere(position: Vec2, resolution: Vec2, radius: f64) -> Vec3 {
    angles_to_direction(pixel_to_angles(position, resolution)) * radius
}
