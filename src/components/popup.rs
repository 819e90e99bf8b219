use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlIFrameElement};

use crate::dom::{self, Bindings};

/// Live preview of example sites in an iframe popup.
pub struct ExamplesPopup {
    popup: Element,
    frame: HtmlIFrameElement,
    close: Element,
    thumbs: Vec<Element>,
}

struct Handles {
    popup: Element,
    frame: HtmlIFrameElement,
}

impl Handles {
    fn open(&self, url: &str) {
        self.frame.set_src(url);
        let _ = self.popup.class_list().remove_1("hidden");
    }

    fn close(&self) {
        self.frame.set_src("");
        let _ = self.popup.class_list().add_1("hidden");
    }
}

impl ExamplesPopup {
    pub fn locate(document: &Document) -> Option<Self> {
        Some(Self {
            popup: dom::by_id(document, "iframePopup")?,
            frame: dom::by_id(document, "previewFrame")?,
            close: dom::query(document, ".popup-close")?,
            thumbs: dom::query_all(document, ".thumb"),
        })
    }

    pub fn bind(self, bindings: &mut Bindings) {
        let handles = Rc::new(Handles {
            popup: self.popup.clone(),
            frame: self.frame,
        });

        for thumb in &self.thumbs {
            let handles = handles.clone();
            let source = thumb.clone();
            bindings.listen(thumb, "click", move |_| {
                let url = source.get_attribute("data-url").unwrap_or_default();
                handles.open(&url);
            });
        }

        {
            let handles = handles.clone();
            bindings.listen(&self.close, "click", move |_| handles.close());
        }

        // Clicks on the backdrop close, clicks inside the content do not
        let backdrop: EventTarget = self.popup.clone().unchecked_into();
        bindings.listen(&self.popup, "click", move |event| {
            if event.target().as_ref() == Some(&backdrop) {
                handles.close();
            }
        });
    }
}
