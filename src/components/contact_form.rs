use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, FormData, HtmlElement, HtmlFormElement, ScrollLogicalPosition};

use crate::contact::{ContactDispatcher, ContactFields, ContactView, EmailJs, MessageKind};
use crate::dom::{self, Bindings, ButtonAffordance};
use crate::pending::PendingView;
use crate::tracking::Tracker;

struct ContactPanel {
    form: HtmlFormElement,
    button: ButtonAffordance,
    message: HtmlElement,
}

impl PendingView for ContactPanel {
    fn set_pending(&self, pending: bool) {
        self.button.set_pending(pending);
    }
}

impl ContactView for ContactPanel {
    fn hide_message(&self) {
        dom::set_display(&self.message, "none");
    }

    fn show_message(&self, text: &str, kind: MessageKind) {
        self.message.set_text_content(Some(text));
        self.message
            .set_class_name(&format!("form-message {}", kind.css_class()));
        dom::set_display(&self.message, "block");
        dom::scroll_into_view(&self.message, ScrollLogicalPosition::Center);
    }

    fn reset_form(&self) {
        self.form.reset();
    }
}

/// Contact form delivered through EmailJS.
pub struct ContactForm {
    panel: ContactPanel,
}

impl ContactForm {
    pub fn locate(document: &Document) -> Option<Self> {
        Some(Self {
            panel: ContactPanel {
                form: dom::by_id(document, "contactForm")?,
                button: ButtonAffordance::locate(document, "submitBtn")?,
                message: dom::by_id(document, "formMessage")?,
            },
        })
    }

    pub fn bind(self, bindings: &mut Bindings, tracker: &Rc<dyn Tracker>) {
        let form = self.panel.form.clone();
        let dispatcher = Rc::new(ContactDispatcher::new(
            EmailJs::from_config(),
            self.panel,
            tracker.clone(),
            Box::new(dom::local_timestamp),
        ));

        let source = form.clone();
        bindings.listen(&form, "submit", move |event| {
            event.prevent_default();
            let Ok(data) = FormData::new_with_form(&source) else {
                return;
            };
            let fields = ContactFields {
                name: dom::form_value(&data, "nome"),
                email: dom::form_value(&data, "email"),
                phone: dom::form_value(&data, "telefono"),
                business_type: dom::form_value(&data, "tipo_attivita"),
                message: dom::form_value(&data, "messaggio"),
            };
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                dispatcher.submit(fields).await;
            });
        });
    }
}
