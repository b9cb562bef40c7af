#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use foundation::math::Vec3;
use navigation::{
    ButtonHandle, ButtonStyleSet, ButtonVariant, Panorama, Renderer, SwapTicket, UiHost,
};

/// Host call, in the order the session issued it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreatePanorama(String),
    SetTexture(String, SwapTicket),
    DisposePanorama,
    CreateButton { id: usize, label: String },
    Variant { id: usize, variant: ButtonVariant },
    Tooltip { id: usize, visible: bool },
    DisposeButton { id: usize },
    Info(String),
    ShowLoading,
    HideLoading,
}

/// Host double that only records what it is asked to do.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Rc<RefCell<Vec<Call>>>,
    next_button: Rc<RefCell<usize>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

pub struct RecordedPanorama {
    host: RecordingHost,
}

impl Panorama for RecordedPanorama {
    fn set_texture(&mut self, asset_path: &str, ticket: SwapTicket) {
        self.host
            .record(Call::SetTexture(asset_path.to_string(), ticket));
    }

    fn dispose(&mut self) {
        self.host.record(Call::DisposePanorama);
    }
}

pub struct RecordedButton {
    host: RecordingHost,
    pub id: usize,
}

impl ButtonHandle for RecordedButton {
    fn set_variant(&mut self, variant: ButtonVariant) {
        self.host.record(Call::Variant {
            id: self.id,
            variant,
        });
    }

    fn set_tooltip_visible(&mut self, visible: bool) {
        self.host.record(Call::Tooltip {
            id: self.id,
            visible,
        });
    }

    fn dispose(&mut self) {
        self.host.record(Call::DisposeButton { id: self.id });
    }
}

impl Renderer for RecordingHost {
    type Panorama = RecordedPanorama;

    fn create_panorama(&mut self, asset_path: &str, _diameter: f64) -> RecordedPanorama {
        self.record(Call::CreatePanorama(asset_path.to_string()));
        RecordedPanorama { host: self.clone() }
    }
}

impl UiHost for RecordingHost {
    type Button = RecordedButton;

    fn create_button(&mut self, _anchor: Vec3, label: &str, _style: &ButtonStyleSet) -> RecordedButton {
        let id = {
            let mut next = self.next_button.borrow_mut();
            *next += 1;
            *next
        };
        self.record(Call::CreateButton {
            id,
            label: label.to_string(),
        });
        RecordedButton {
            host: self.clone(),
            id,
        }
    }

    fn show_info(&mut self, message: &str, _duration_ms: u32, _delay_ms: u32) {
        self.record(Call::Info(message.to_string()));
    }

    fn show_loading(&mut self) {
        self.record(Call::ShowLoading);
    }

    fn hide_loading(&mut self) {
        self.record(Call::HideLoading);
    }
}
