use foundation::math::Vec3;

use crate::picking::Ray;

/// First-person camera standing at the dome centre.
///
/// The viewer can only turn: yaw around the vertical axis, pitch up/down.
/// The horizontal field of view is fixed at construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LookCamera {
    pub yaw_rad: f64,
    pub pitch_rad: f64,
    fov_horizontal_rad: f64,
}

/// Pitch stays just short of straight up/down to keep the basis well defined.
pub const MAX_PITCH_RAD: f64 = 1.55;

impl LookCamera {
    pub fn new(fov_horizontal_rad: f64) -> Self {
        Self {
            yaw_rad: 0.0,
            pitch_rad: 0.0,
            fov_horizontal_rad,
        }
    }

    pub fn fov_horizontal_rad(&self) -> f64 {
        self.fov_horizontal_rad
    }

    /// Turns the camera by pointer delta; `speed` is radians per pixel.
    pub fn look(&mut self, delta_x_px: f64, delta_y_px: f64, speed: f64) {
        self.yaw_rad += delta_x_px * speed;
        self.pitch_rad =
            (self.pitch_rad + delta_y_px * speed).clamp(-MAX_PITCH_RAD, MAX_PITCH_RAD);
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch_rad.cos() * self.yaw_rad.cos(),
            self.pitch_rad.sin(),
            self.pitch_rad.cos() * self.yaw_rad.sin(),
        )
    }

    /// Ray from the dome centre through the pixel `(x_px, y_px)` of a
    /// `width x height` viewport. `None` for an empty viewport.
    pub fn screen_ray(&self, x_px: f64, y_px: f64, width: f64, height: f64) -> Option<Ray> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let forward = self.forward();
        let right = forward.cross(Vec3::new(0.0, 1.0, 0.0)).normalized()?;
        let up = right.cross(forward);

        let half_w = (0.5 * self.fov_horizontal_rad).tan();
        let half_h = half_w * height / width;
        let ndc_x = 2.0 * x_px / width - 1.0;
        let ndc_y = 1.0 - 2.0 * y_px / height;

        let dir = forward + right * (ndc_x * half_w) + up * (ndc_y * half_h);
        Some(Ray::new(Vec3::ZERO, dir))
    }
}

#[cfg(test)]
mod tests {
    use super::{LookCamera, MAX_PITCH_RAD};
    use std::f64::consts::PI;

    #[test]
    fn centre_pixel_looks_forward() {
        let cam = LookCamera::new(PI * 0.33);
        let ray = cam.screen_ray(640.0, 360.0, 1280.0, 720.0).expect("ray");
        let dir = ray.dir.normalized().expect("unit");
        assert!((dir.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn right_edge_matches_half_fov() {
        let fov = PI * 0.5;
        let cam = LookCamera::new(fov);
        let ray = cam.screen_ray(1280.0, 360.0, 1280.0, 720.0).expect("ray");
        let angle = ray.dir.z.atan2(ray.dir.x);
        assert!((angle - fov * 0.5).abs() < 1e-12);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = LookCamera::new(1.0);
        cam.look(0.0, 10_000.0, 0.01);
        assert_eq!(cam.pitch_rad, MAX_PITCH_RAD);
        cam.look(0.0, -20_000.0, 0.01);
        assert_eq!(cam.pitch_rad, -MAX_PITCH_RAD);
    }

    #[test]
    fn empty_viewport_has_no_ray() {
        assert!(LookCamera::new(1.0).screen_ray(0.0, 0.0, 0.0, 10.0).is_none());
    }
}
