use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{js_sys, Document, Event, Window};

mod audit;
mod components;
mod config;
mod contact;
mod dom;
mod pending;
mod site;
mod toggle;
mod tracking;

use tracking::Gtag;

fn boot(window: &Window, document: &Document) {
    let handle = site::initialize(window, document, Rc::new(Gtag));
    info!("Page ready: {}", handle.components().join(", "));

    // Listeners live until the page is unloaded for good
    let handle = RefCell::new(Some(handle));
    let on_hide = Closure::wrap(Box::new(move |event: Event| {
        let persisted = js_sys::Reflect::get(&event, &"persisted".into())
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        if persisted {
            return; // back/forward cache, the page may come back
        }
        if let Some(handle) = handle.borrow_mut().take() {
            handle.dispose();
        }
    }) as Box<dyn FnMut(Event)>);
    let _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if let Err(e) = console_log::init_with_level(config::log_level()) {
        web_sys::console::warn_1(&format!("error initializing log: {}", e).into());
    }

    info!("Starting site scripts");

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() != "loading" {
        boot(&window, &document);
        return;
    }

    let on_ready = Closure::once(move || {
        if let Some(document) = window.document() {
            boot(&window, &document);
        }
    });
    let _ = document.add_event_listener_with_callback(
        "DOMContentLoaded",
        on_ready.as_ref().unchecked_ref(),
    );
    on_ready.forget();
}
