use web_sys::{Document, Element, ScrollLogicalPosition};

use crate::dom::{self, Bindings};

/// In-page anchors scroll smoothly instead of jumping.
pub struct SmoothScroll {
    document: Document,
    anchors: Vec<Element>,
}

impl SmoothScroll {
    pub fn locate(document: &Document) -> Option<Self> {
        let anchors = dom::query_all(document, r##"a[href^="#"]"##);
        if anchors.is_empty() {
            return None;
        }
        Some(Self {
            document: document.clone(),
            anchors,
        })
    }

    pub fn bind(self, bindings: &mut Bindings) {
        for anchor in self.anchors {
            let document = self.document.clone();
            let href = anchor.clone();
            bindings.listen(&anchor, "click", move |event| {
                event.prevent_default();
                let Some(selector) = href.get_attribute("href") else {
                    return;
                };
                // A bare "#" is not a valid selector, query returns None
                if let Some(target) = dom::query(&document, &selector) {
                    dom::scroll_into_view(&target, ScrollLogicalPosition::Start);
                }
            });
        }
    }
}
