use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use web_sys::{Document, Element};

use crate::dom::{self, Bindings};
use crate::toggle::Accordion;
use crate::tracking::{self, Tracker};

struct FaqItem {
    question: Element,
    answer: Option<Element>,
}

impl FaqItem {
    fn set_expanded(&self, expanded: bool) {
        let _ = self
            .question
            .set_attribute("aria-expanded", if expanded { "true" } else { "false" });
        if let Some(answer) = &self.answer {
            let _ = answer.class_list().toggle_with_force("active", expanded);
        }
    }

    fn label(&self) -> String {
        self.question
            .query_selector("span")
            .ok()
            .flatten()
            .and_then(|span| span.text_content())
            .unwrap_or_default()
    }
}

/// FAQ accordion over `.faq-question` buttons, each followed by its answer.
pub struct Faq {
    items: Rc<Vec<FaqItem>>,
}

impl Faq {
    pub fn locate(document: &Document) -> Option<Self> {
        let items: Vec<FaqItem> = dom::query_all(document, ".faq-question")
            .into_iter()
            .map(|question| FaqItem {
                answer: question.next_element_sibling(),
                question,
            })
            .collect();
        if items.is_empty() {
            return None;
        }
        Some(Self {
            items: Rc::new(items),
        })
    }

    pub fn bind(self, bindings: &mut Bindings, tracker: &Rc<dyn Tracker>) {
        let initially_open = self.items.iter().position(|item| {
            item.question.get_attribute("aria-expanded").as_deref() == Some("true")
        });
        let accordion = Rc::new(RefCell::new(Accordion::new(self.items.len(), initially_open)));

        for (index, item) in self.items.iter().enumerate() {
            let items = self.items.clone();
            let accordion = accordion.clone();
            let tracker = tracker.clone();
            bindings.listen(&item.question, "click", move |_| {
                let mut accordion = accordion.borrow_mut();
                let Some(action) = accordion.toggle(index) else {
                    return;
                };
                for (i, item) in items.iter().enumerate() {
                    item.set_expanded(accordion.is_expanded(i));
                }
                log::debug!("FAQ expanded item: {:?}", accordion.expanded());
                tracker.emit(
                    tracking::FAQ_INTERACTION,
                    json!({
                        "faq_question": items[index].label(),
                        "action": action.as_str(),
                    }),
                );
            });
        }
    }
}
