use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys, Document, Element, Event, EventTarget, FormData, HtmlButtonElement, HtmlElement,
    IntersectionObserver, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config;
use crate::pending::PendingView;

/// An event listener that unregisters itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Self
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            log::warn!("Could not listen for {}: {:?}", event, e);
        }
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Everything a component registered on the page.
#[derive(Default)]
pub struct Bindings {
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
}

impl Bindings {
    pub fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        self.listeners.push(Listener::new(target, event, handler));
    }

    pub fn keep_observer(&mut self, observer: IntersectionObserver, callback: ObserverCallback) {
        self.observers.push(Observer {
            observer,
            _callback: callback,
        });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn child<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector).ok().flatten()?.dyn_into::<T>().ok()
}

pub fn set_display(element: &HtmlElement, value: &str) {
    let _ = element.style().set_property("display", value);
}

pub fn scroll_into_view(element: &Element, block: ScrollLogicalPosition) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(block);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn page_location() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

/// Current local time formatted the Italian way, e.g. `19/10/2026, 10:30:00`.
pub fn local_timestamp() -> String {
    js_sys::Date::new_0()
        .to_locale_string(config::TIMESTAMP_LOCALE, &JsValue::UNDEFINED)
        .into()
}

/// Text value of a named form field, empty when missing.
pub fn form_value(data: &FormData, name: &str) -> String {
    data.get(name).as_string().unwrap_or_default()
}

/// A submit button with `.btn-text` and `.btn-loading` children.
pub struct ButtonAffordance {
    button: HtmlButtonElement,
    text: Option<HtmlElement>,
    loading: Option<HtmlElement>,
}

impl ButtonAffordance {
    pub fn locate(document: &Document, id: &str) -> Option<Self> {
        let button: HtmlButtonElement = by_id(document, id)?;
        Some(Self {
            text: child(&button, ".btn-text"),
            loading: child(&button, ".btn-loading"),
            button,
        })
    }
}

impl PendingView for ButtonAffordance {
    fn set_pending(&self, pending: bool) {
        self.button.set_disabled(pending);
        if let Some(text) = &self.text {
            set_display(text, if pending { "none" } else { "block" });
        }
        if let Some(loading) = &self.loading {
            set_display(loading, if pending { "flex" } else { "none" });
        }
    }
}
