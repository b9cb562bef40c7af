use web_sys::{Document, Element};

pub const LOADING_SCREEN_ID: &str = "loadingScreen";
pub const LOADING_TIP_ID: &str = "loadingTip";

/// DOM loading overlay toggled with the `loading` / `loaded` classes.
///
/// A page without the overlay elements still works; the calls become no-ops.
#[derive(Debug)]
pub struct LoadingScreen {
    container: Option<Element>,
    tip: Option<Element>,
    tips: Vec<String>,
}

impl LoadingScreen {
    pub fn attach(tips: Vec<String>) -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        let lookup = |id: &str| document.as_ref().and_then(|d: &Document| d.get_element_by_id(id));
        let container = lookup(LOADING_SCREEN_ID);
        if container.is_none() {
            tracing::warn!(id = LOADING_SCREEN_ID, "loading container not found");
        }
        Self {
            container,
            tip: lookup(LOADING_TIP_ID),
            tips,
        }
    }

    pub fn show(&self) {
        if let Some(tip) = &self.tip {
            if let Some(text) = self.random_tip() {
                tip.set_text_content(Some(&format!("DID YOU KNOW? {text}")));
            }
        }
        self.set_class("loading", "loaded");
    }

    pub fn hide(&self) {
        self.set_class("loaded", "loading");
    }

    fn random_tip(&self) -> Option<&str> {
        if self.tips.is_empty() {
            return None;
        }
        let pick = (js_sys::Math::random() * self.tips.len() as f64) as usize;
        self.tips
            .get(pick.min(self.tips.len() - 1))
            .map(String::as_str)
    }

    fn set_class(&self, add: &str, remove: &str) {
        let Some(container) = &self.container else {
            return;
        };
        let classes = container.class_list();
        if let Err(err) = classes.remove_1(remove) {
            tracing::warn!(class = remove, error = ?err, "loading screen class not removed");
        }
        if let Err(err) = classes.add_1(add) {
            tracing::warn!(class = add, error = ?err, "loading screen class not added");
        }
    }
}
