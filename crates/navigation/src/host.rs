//! Capabilities the session needs from its environment.
//!
//! A browser page, a headless scene or a test double can all drive a
//! [`crate::Session`] by implementing [`Renderer`] and [`UiHost`] on one type.

use foundation::math::Vec3;
use runtime::Generation;

use crate::style::{ButtonStyleSet, ButtonVariant};

/// Tag attached to one panorama texture request.
///
/// The host hands it back through `Session::texture_loaded`; completions
/// whose generation is no longer current are ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SwapTicket {
    pub generation: Generation,
}

/// The sphere carrying the current panorama.
pub trait Panorama {
    /// Starts loading `asset_path`; completion is reported with `ticket`.
    fn set_texture(&mut self, asset_path: &str, ticket: SwapTicket);
    fn dispose(&mut self);
}

pub trait Renderer {
    type Panorama: Panorama;

    fn create_panorama(&mut self, asset_path: &str, diameter: f64) -> Self::Panorama;
}

/// Host-side resource backing one hotspot button.
pub trait ButtonHandle {
    fn set_variant(&mut self, variant: ButtonVariant);
    fn set_tooltip_visible(&mut self, visible: bool);
    /// Releases the resource. Called at most once per handle.
    fn dispose(&mut self);
}

pub trait UiHost {
    type Button: ButtonHandle;

    fn create_button(&mut self, anchor: Vec3, label: &str, style: &ButtonStyleSet)
        -> Self::Button;
    /// Timed banner; shown after `delay_ms`, hidden after `duration_ms`.
    fn show_info(&mut self, message: &str, duration_ms: u32, delay_ms: u32);
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
}
