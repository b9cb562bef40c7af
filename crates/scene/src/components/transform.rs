use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            scale: 1.0,
        }
    }

    /// Distance from the scene origin, where the viewer stands.
    pub fn distance_from_origin(&self) -> f64 {
        self.position.length()
    }
}
