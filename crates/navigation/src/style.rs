/// Visual state of a hotspot button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Default,
    /// Hovered.
    Active,
}

/// Textures and sizes shared by every hotspot button of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyleSet {
    pub default_texture: String,
    pub active_texture: String,
    /// Edge length in world units.
    pub size: f64,
    pub caption_size: f64,
    pub tooltip_offset_y: f64,
}

impl ButtonStyleSet {
    pub fn texture_for(&self, variant: ButtonVariant) -> &str {
        match variant {
            ButtonVariant::Default => &self.default_texture,
            ButtonVariant::Active => &self.active_texture,
        }
    }
}
