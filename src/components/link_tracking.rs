//! Page-wide click and submit tracking.
//!
//! These listeners sit alongside the component ones: a WhatsApp link inside
//! the audit panel reports both its own event and the generic one.

use std::rc::Rc;

use serde_json::json;
use web_sys::{Document, Element};

use crate::dom::{self, Bindings};
use crate::tracking::{self, first_label, Tracker};

pub struct LinkTracking {
    whatsapp_links: Vec<Element>,
    phone_links: Vec<Element>,
    forms: Vec<Element>,
}

impl LinkTracking {
    pub fn locate(document: &Document) -> Option<Self> {
        let tracking = Self {
            whatsapp_links: dom::query_all(document, r#"a[href*="wa.me"]"#),
            phone_links: dom::query_all(document, r#"a[href^="tel:"]"#),
            forms: dom::query_all(document, "form"),
        };
        let empty = tracking.whatsapp_links.is_empty()
            && tracking.phone_links.is_empty()
            && tracking.forms.is_empty();
        (!empty).then_some(tracking)
    }

    pub fn bind(self, bindings: &mut Bindings, tracker: &Rc<dyn Tracker>) {
        for link in &self.whatsapp_links {
            let source = first_label([link.closest("section").ok().flatten().map(|s| s.id())]);
            let tracker = tracker.clone();
            bindings.listen(link, "click", move |_| {
                tracker.emit(
                    tracking::WHATSAPP_CLICK,
                    json!({ "source": source, "page_location": dom::page_location() }),
                );
            });
        }

        for link in &self.phone_links {
            let tracker = tracker.clone();
            bindings.listen(link, "click", move |_| {
                tracker.emit(
                    tracking::PHONE_CALL,
                    json!({ "page_location": dom::page_location() }),
                );
            });
        }

        for form in &self.forms {
            let form_type = first_label([Some(form.id()), Some(form.class_name())]);
            let tracker = tracker.clone();
            bindings.listen(form, "submit", move |_| {
                tracker.emit(
                    tracking::FORM_SUBMIT,
                    json!({ "form_type": form_type, "page_location": dom::page_location() }),
                );
            });
        }
    }
}
