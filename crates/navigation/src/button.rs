use std::fmt;

use foundation::math::Vec3;
use tour::ViewpointId;

use crate::host::{ButtonHandle, UiHost};
use crate::style::{ButtonStyleSet, ButtonVariant};

/// One interactive hotspot: a host button bound to a target viewpoint.
///
/// The button never sees the graph; activation just runs `on_activate`.
/// Every trigger is a no-op once the button is disposed, and dropping an
/// undisposed button disposes it.
pub struct HotspotButton<B: ButtonHandle> {
    handle: Option<B>,
    anchor: Vec3,
    label: String,
    target: ViewpointId,
    variant: ButtonVariant,
    on_activate: Box<dyn FnMut()>,
}

impl<B: ButtonHandle> HotspotButton<B> {
    pub fn create<U>(
        host: &mut U,
        anchor: Vec3,
        label: impl Into<String>,
        target: ViewpointId,
        style: &ButtonStyleSet,
        on_activate: impl FnMut() + 'static,
    ) -> Self
    where
        U: UiHost<Button = B> + ?Sized,
    {
        let label = label.into();
        let handle = host.create_button(anchor, &label, style);
        Self {
            handle: Some(handle),
            anchor,
            label,
            target,
            variant: ButtonVariant::Default,
            on_activate: Box::new(on_activate),
        }
    }

    pub fn pointer_enter(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            self.variant = ButtonVariant::Active;
            handle.set_variant(ButtonVariant::Active);
            handle.set_tooltip_visible(true);
        }
    }

    pub fn pointer_leave(&mut self) {
        if let Some(handle) = self.handle.as_mut() {
            self.variant = ButtonVariant::Default;
            handle.set_variant(ButtonVariant::Default);
            handle.set_tooltip_visible(false);
        }
    }

    /// Returns `false` if the button is already disposed.
    pub fn activate(&mut self) -> bool {
        let Some(handle) = self.handle.as_mut() else {
            return false;
        };
        handle.set_tooltip_visible(false);
        (self.on_activate)();
        true
    }

    /// Releases the host resource. Returns whether this call did the work.
    pub fn dispose(&mut self) -> bool {
        match self.handle.take() {
            Some(mut handle) => {
                handle.dispose();
                self.on_activate = Box::new(|| {});
                true
            }
            None => false,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.is_none()
    }

    pub fn handle(&self) -> Option<&B> {
        self.handle.as_ref()
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> &ViewpointId {
        &self.target
    }

    pub fn variant(&self) -> ButtonVariant {
        self.variant
    }
}

impl<B: ButtonHandle> Drop for HotspotButton<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<B: ButtonHandle> fmt::Debug for HotspotButton<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotspotButton")
            .field("label", &self.label)
            .field("target", &self.target)
            .field("variant", &self.variant)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::HotspotButton;
    use crate::host::{ButtonHandle, UiHost};
    use crate::style::{ButtonStyleSet, ButtonVariant};
    use foundation::math::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tour::ViewpointId;

    type Log = Rc<RefCell<Vec<String>>>;

    struct FakeButton {
        log: Log,
    }

    impl ButtonHandle for FakeButton {
        fn set_variant(&mut self, variant: ButtonVariant) {
            self.log.borrow_mut().push(format!("variant {variant:?}"));
        }
        fn set_tooltip_visible(&mut self, visible: bool) {
            self.log.borrow_mut().push(format!("tooltip {visible}"));
        }
        fn dispose(&mut self) {
            self.log.borrow_mut().push("dispose".to_string());
        }
    }

    struct FakeUi {
        log: Log,
    }

    impl UiHost for FakeUi {
        type Button = FakeButton;

        fn create_button(&mut self, _: Vec3, label: &str, _: &ButtonStyleSet) -> FakeButton {
            self.log.borrow_mut().push(format!("create {label}"));
            FakeButton {
                log: Rc::clone(&self.log),
            }
        }
        fn show_info(&mut self, _: &str, _: u32, _: u32) {}
        fn show_loading(&mut self) {}
        fn hide_loading(&mut self) {}
    }

    fn style() -> ButtonStyleSet {
        ButtonStyleSet {
            default_texture: "button.png".to_string(),
            active_texture: "buttonActive.png".to_string(),
            size: 100.0,
            caption_size: 18.0,
            tooltip_offset_y: -192.0,
        }
    }

    fn button(clicks: Rc<RefCell<u32>>) -> (HotspotButton<FakeButton>, Log) {
        let log: Log = Rc::default();
        let mut ui = FakeUi {
            log: Rc::clone(&log),
        };
        let button = HotspotButton::create(
            &mut ui,
            Vec3::new(0.0, 0.0, -450.0),
            "Main hall",
            ViewpointId::new("mainHall"),
            &style(),
            move || *clicks.borrow_mut() += 1,
        );
        (button, log)
    }

    #[test]
    fn hover_switches_variant_and_tooltip() {
        let (mut button, log) = button(Rc::default());
        button.pointer_enter();
        assert_eq!(button.variant(), ButtonVariant::Active);
        button.pointer_leave();
        assert_eq!(button.variant(), ButtonVariant::Default);
        assert_eq!(
            *log.borrow(),
            vec![
                "create Main hall",
                "variant Active",
                "tooltip true",
                "variant Default",
                "tooltip false"
            ]
        );
    }

    #[test]
    fn activate_runs_callback_once_per_click() {
        let clicks = Rc::new(RefCell::new(0));
        let (mut button, _) = button(Rc::clone(&clicks));
        assert!(button.activate());
        assert!(button.activate());
        assert_eq!(*clicks.borrow(), 2);
    }

    #[test]
    fn dispose_is_idempotent_and_detaches_triggers() {
        let clicks = Rc::new(RefCell::new(0));
        let (mut button, log) = button(Rc::clone(&clicks));
        assert!(button.dispose());
        assert!(!button.dispose());
        assert!(button.is_disposed());

        button.pointer_enter();
        assert!(!button.activate());
        assert_eq!(*clicks.borrow(), 0);
        drop(button);

        let disposes = log.borrow().iter().filter(|l| *l == "dispose").count();
        assert_eq!(disposes, 1);
    }

    #[test]
    fn drop_disposes_live_button() {
        let (button, log) = button(Rc::default());
        drop(button);
        assert_eq!(log.borrow().last().map(String::as_str), Some("dispose"));
    }
}
