/// Caption bubble linked to an entity, hidden until hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub width_px: f64,
    /// Screen-space offset of the bubble from its anchor.
    pub offset_y_px: f64,
    pub visible: bool,
}

impl Tooltip {
    /// Bubble sized at `caption_px` per character, like a monospace caption.
    pub fn caption(text: impl Into<String>, caption_px: f64, offset_y_px: f64) -> Self {
        let text = text.into();
        let width_px = text.chars().count() as f64 * caption_px;
        Self {
            text,
            width_px,
            offset_y_px,
            visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Tooltip;

    #[test]
    fn caption_width_scales_with_text() {
        let tip = Tooltip::caption("Main hall", 18.0, -192.0);
        assert_eq!(tip.width_px, 9.0 * 18.0);
        assert!(!tip.visible);
    }
}
