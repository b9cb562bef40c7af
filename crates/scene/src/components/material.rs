#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    /// Texture asset path.
    pub texture: String,
}

impl Material {
    pub fn textured(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
        }
    }
}
