use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    js_sys, Document, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config;
use crate::dom::{self, Bindings};

/// Adds `visible` to `.animate-on-scroll` elements the first time they
/// enter the viewport. Revealed elements stay revealed.
pub struct Reveal {
    elements: Vec<Element>,
}

impl Reveal {
    pub fn locate(document: &Document) -> Option<Self> {
        let elements = dom::query_all(document, ".animate-on-scroll");
        if elements.is_empty() {
            return None;
        }
        Some(Self { elements })
    }

    pub fn bind(self, bindings: &mut Bindings) {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let _ = entry.target().class_list().add_1("visible");
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&config::REVEAL_THRESHOLD.into());

        let observer = match IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver unavailable: {:?}", e);
                return;
            }
        };

        for element in &self.elements {
            observer.observe(element);
        }
        bindings.keep_observer(observer, callback);
    }
}
