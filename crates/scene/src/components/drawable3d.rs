#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    /// Sphere rendered from the inside, carrying a panorama.
    Dome { diameter: f64 },
    /// Square plane that always faces the viewer.
    Billboard { size: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
}

impl Drawable3D {
    pub fn dome(diameter: f64) -> Self {
        Self {
            shape: Shape3D::Dome { diameter },
        }
    }

    pub fn billboard(size: f64) -> Self {
        Self {
            shape: Shape3D::Billboard { size },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Drawable3D, Shape3D};

    #[test]
    fn create_dome_drawable() {
        let drawable = Drawable3D::dome(1000.0);
        assert!(matches!(drawable.shape, Shape3D::Dome { diameter } if diameter == 1000.0));
    }
}
