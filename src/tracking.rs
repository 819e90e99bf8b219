//! Analytics events.
//!
//! Every component gets an `Rc<dyn Tracker>` and reports through it. In the
//! browser that is [`Gtag`], which forwards to `window.gtag` when the Google
//! tag is loaded and silently drops the event otherwise.

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;

pub const FAQ_INTERACTION: &str = "faq_interaction";
pub const SEO_AUDIT_START: &str = "seo_audit_start";
pub const SEO_AUDIT_COMPLETE: &str = "seo_audit_complete";
pub const AUDIT_WHATSAPP_CLICK: &str = "audit_whatsapp_click";
pub const CONTACT_FORM_SUCCESS: &str = "contact_form_success";
pub const CONTACT_FORM_ERROR: &str = "contact_form_error";
pub const WHATSAPP_CLICK: &str = "whatsapp_click";
pub const FORM_SUBMIT: &str = "form_submit";
pub const PHONE_CALL: &str = "phone_call";

pub trait Tracker {
    /// Fire and forget. Implementations never fail and never retry.
    fn emit(&self, event: &str, props: Value);
}

pub struct Gtag;

impl Tracker for Gtag {
    fn emit(&self, event: &str, props: Value) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(gtag) = js_sys::Reflect::get(&window, &JsValue::from_str("gtag")) else {
            return;
        };
        let Some(gtag) = gtag.dyn_ref::<js_sys::Function>() else {
            return;
        };

        // Plain objects rather than JS Maps, gtag ignores the latter
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let props = match props.serialize(&serializer) {
            Ok(props) => props,
            Err(e) => {
                log::warn!("Dropping {} event: {}", event, e);
                return;
            }
        };

        if let Err(e) = gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(event),
            &props,
        ) {
            log::debug!("gtag call for {} failed: {:?}", event, e);
        }
    }
}

/// Returns the first non-empty label, or `"unknown"`.
pub fn first_label<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|label| !label.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
pub use recording::RecordingTracker;

#[cfg(test)]
mod recording {
    use super::Tracker;
    use serde_json::Value;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct RecordingTracker {
        pub events: RefCell<Vec<(String, Value)>>,
    }

    impl RecordingTracker {
        pub fn names(&self) -> Vec<String> {
            self.events.borrow().iter().map(|(name, _)| name.clone()).collect()
        }

        pub fn count(&self, event: &str) -> usize {
            self.events.borrow().iter().filter(|(name, _)| name == event).count()
        }

        pub fn props(&self, event: &str) -> Option<Value> {
            self.events
                .borrow()
                .iter()
                .find(|(name, _)| name == event)
                .map(|(_, props)| props.clone())
        }
    }

    impl Tracker for RecordingTracker {
        fn emit(&self, event: &str, props: Value) {
            self.events.borrow_mut().push((event.to_string(), props));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_label_prefers_first_non_empty() {
        let label = first_label([Some(String::new()), Some("contactForm".into()), Some("form".into())]);
        assert_eq!(label, "contactForm");
    }

    #[test]
    fn first_label_falls_back_to_unknown() {
        assert_eq!(first_label([None, Some(String::new())]), "unknown");
        assert_eq!(first_label(Vec::new()), "unknown");
    }

    #[test]
    fn recording_tracker_keeps_order() {
        let tracker = RecordingTracker::default();
        tracker.emit(FORM_SUBMIT, json!({ "form_type": "a" }));
        tracker.emit(PHONE_CALL, json!({}));
        tracker.emit(FORM_SUBMIT, json!({ "form_type": "b" }));

        assert_eq!(tracker.names(), vec![FORM_SUBMIT, PHONE_CALL, FORM_SUBMIT]);
        assert_eq!(tracker.count(FORM_SUBMIT), 2);
        assert_eq!(tracker.props(FORM_SUBMIT), Some(json!({ "form_type": "a" })));
    }
}
