use web_sys::{Document, Element, Window};

use crate::config;
use crate::dom::{self, Bindings};
use crate::toggle::past_threshold;

/// Floating WhatsApp button, hidden near the top of the page.
pub struct FloatingButton {
    window: Window,
    button: Element,
}

impl FloatingButton {
    pub fn locate(window: &Window, document: &Document) -> Option<Self> {
        Some(Self {
            window: window.clone(),
            button: dom::by_id(document, "floatingWhatsapp")?,
        })
    }

    pub fn bind(self, bindings: &mut Bindings) {
        let window = self.window.clone();
        let button = self.button;
        bindings.listen(&self.window, "scroll", move |_| {
            let offset = window.scroll_y().unwrap_or(0.0);
            let visible = past_threshold(offset, config::FLOATING_BUTTON_THRESHOLD);
            let _ = button.class_list().toggle_with_force("hidden", !visible);
        });
    }
}
