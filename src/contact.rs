//! Contact form delivery through EmailJS.

use std::cell::Cell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::config;
use crate::pending::{PendingGuard, PendingView};
use crate::tracking::{self, Tracker};

pub const SUCCESS_TEXT: &str = "✅ Messaggio inviato con successo! Ti risponderemo entro 24 ore.";
pub const FAILURE_TEXT: &str = "❌ Errore nell'invio del messaggio. Riprova o contattaci su WhatsApp.";

/// Raw form values. Empty strings stand for fields left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub message: String,
}

/// Template parameters exactly as the EmailJS template expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "tipo_attivita")]
    pub business_type: String,
    #[serde(rename = "messaggio")]
    pub message: String,
    #[serde(rename = "to_email")]
    pub recipient: String,
    #[serde(rename = "data_invio")]
    pub sent_at: String,
}

fn or_sentinel(value: String, sentinel: &str) -> String {
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value
    }
}

impl ContactMessage {
    pub fn new(fields: ContactFields, sent_at: String) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            phone: or_sentinel(fields.phone, config::PHONE_SENTINEL),
            business_type: fields.business_type,
            message: or_sentinel(fields.message, config::MESSAGE_SENTINEL),
            recipient: config::CONTACT_RECIPIENT.to_string(),
            sent_at,
        }
    }

    pub fn has_phone(&self) -> bool {
        self.phone != config::PHONE_SENTINEL
    }
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Request(#[from] gloo_net::Error),
    #[error("EmailJS rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Another submission is still in flight, nothing was sent.
    Pending,
    Success,
    Failure(String),
}

pub trait EmailSender {
    fn send(&self, message: &ContactMessage) -> LocalBoxFuture<'static, Result<(), DeliveryError>>;
}

pub struct EmailJs {
    endpoint: &'static str,
    service_id: &'static str,
    template_id: &'static str,
    public_key: &'static str,
}

impl EmailJs {
    pub fn from_config() -> Self {
        Self {
            endpoint: config::EMAILJS_ENDPOINT,
            service_id: config::EMAILJS_SERVICE_ID,
            template_id: config::EMAILJS_TEMPLATE_ID,
            public_key: config::EMAILJS_PUBLIC_KEY,
        }
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactMessage,
}

impl EmailSender for EmailJs {
    fn send(&self, message: &ContactMessage) -> LocalBoxFuture<'static, Result<(), DeliveryError>> {
        let request = Request::post(self.endpoint).json(&SendRequest {
            service_id: self.service_id,
            template_id: self.template_id,
            user_id: self.public_key,
            template_params: message,
        });

        async move {
            let response = request?.send().await?;
            if response.ok() {
                Ok(())
            } else {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                Err(DeliveryError::Rejected { status, body })
            }
        }
        .boxed_local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

pub trait ContactView: PendingView {
    fn hide_message(&self);
    fn show_message(&self, text: &str, kind: MessageKind);
    fn reset_form(&self);
}

pub struct ContactDispatcher<S, V> {
    sender: S,
    view: V,
    tracker: Rc<dyn Tracker>,
    clock: Box<dyn Fn() -> String>,
    in_flight: Cell<bool>,
}

impl<S: EmailSender, V: ContactView> ContactDispatcher<S, V> {
    pub fn new(
        sender: S,
        view: V,
        tracker: Rc<dyn Tracker>,
        clock: Box<dyn Fn() -> String>,
    ) -> Self {
        Self {
            sender,
            view,
            tracker,
            clock,
            in_flight: Cell::new(false),
        }
    }

    pub async fn submit(&self, fields: ContactFields) -> SubmissionOutcome {
        let Some(guard) = PendingGuard::acquire(&self.in_flight, &self.view) else {
            log::debug!("Contact form already sending, ignoring submit");
            return SubmissionOutcome::Pending;
        };
        self.view.hide_message();

        let message = ContactMessage::new(fields, (self.clock)());
        let outcome = match self.sender.send(&message).await {
            Ok(()) => {
                self.view.show_message(SUCCESS_TEXT, MessageKind::Success);
                self.view.reset_form();
                self.tracker.emit(
                    tracking::CONTACT_FORM_SUCCESS,
                    json!({
                        "business_type": message.business_type,
                        "has_phone": if message.has_phone() { "yes" } else { "no" },
                    }),
                );
                SubmissionOutcome::Success
            }
            Err(e) => {
                self.view.show_message(FAILURE_TEXT, MessageKind::Error);
                log::error!("EmailJS error: {}", e);
                self.tracker.emit(
                    tracking::CONTACT_FORM_ERROR,
                    json!({ "error_type": "emailjs_error" }),
                );
                SubmissionOutcome::Failure(e.to_string())
            }
        };

        drop(guard);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::RecordingTracker;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::ready;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    type Reply = LocalBoxFuture<'static, Result<(), DeliveryError>>;

    #[derive(Default)]
    struct StubSender {
        replies: RefCell<VecDeque<Reply>>,
        sent: RefCell<Vec<ContactMessage>>,
    }

    impl StubSender {
        fn reply(&self, reply: Reply) {
            self.replies.borrow_mut().push_back(reply);
        }
    }

    impl EmailSender for Rc<StubSender> {
        fn send(&self, message: &ContactMessage) -> Reply {
            self.sent.borrow_mut().push(message.clone());
            self.replies.borrow_mut().pop_front().expect("no reply queued")
        }
    }

    #[derive(Debug, PartialEq)]
    enum ViewCall {
        Pending(bool),
        HideMessage,
        Show(String, MessageKind),
        Reset,
    }

    #[derive(Default)]
    struct RecordingView {
        calls: RefCell<Vec<ViewCall>>,
    }

    impl RecordingView {
        fn count(&self, wanted: &ViewCall) -> usize {
            self.calls.borrow().iter().filter(|call| *call == wanted).count()
        }
    }

    impl PendingView for Rc<RecordingView> {
        fn set_pending(&self, pending: bool) {
            self.calls.borrow_mut().push(ViewCall::Pending(pending));
        }
    }

    impl ContactView for Rc<RecordingView> {
        fn hide_message(&self) {
            self.calls.borrow_mut().push(ViewCall::HideMessage);
        }

        fn show_message(&self, text: &str, kind: MessageKind) {
            self.calls.borrow_mut().push(ViewCall::Show(text.to_string(), kind));
        }

        fn reset_form(&self) {
            self.calls.borrow_mut().push(ViewCall::Reset);
        }
    }

    struct Harness {
        sender: Rc<StubSender>,
        view: Rc<RecordingView>,
        tracker: Rc<RecordingTracker>,
        dispatcher: ContactDispatcher<Rc<StubSender>, Rc<RecordingView>>,
    }

    fn harness() -> Harness {
        let sender = Rc::new(StubSender::default());
        let view = Rc::new(RecordingView::default());
        let tracker = Rc::new(RecordingTracker::default());
        let dispatcher = ContactDispatcher::new(
            sender.clone(),
            view.clone(),
            tracker.clone(),
            Box::new(|| "19/10/2026, 10:30:00".to_string()),
        );
        Harness { sender, view, tracker, dispatcher }
    }

    fn fields() -> ContactFields {
        ContactFields {
            name: "Giulia Rossi".into(),
            email: "giulia@example.com".into(),
            phone: "+39 333 1234567".into(),
            business_type: "ristorante".into(),
            message: "Vorrei più clienti".into(),
        }
    }

    #[test]
    fn blank_optional_fields_get_sentinels() {
        let message = ContactMessage::new(
            ContactFields { phone: String::new(), message: String::new(), ..fields() },
            "now".into(),
        );

        assert_eq!(message.phone, "Non fornito");
        assert_eq!(message.message, "Nessun messaggio aggiuntivo");
        assert!(!message.has_phone());
    }

    #[test]
    fn template_params_use_the_template_keys() {
        let message = ContactMessage::new(fields(), "19/10/2026, 10:30:00".into());
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(
            value,
            json!({
                "nome": "Giulia Rossi",
                "email": "giulia@example.com",
                "telefono": "+39 333 1234567",
                "tipo_attivita": "ristorante",
                "messaggio": "Vorrei più clienti",
                "to_email": "info@visibilitalocale.it",
                "data_invio": "19/10/2026, 10:30:00",
            })
        );
    }

    #[test]
    fn success_clears_form_and_tracks_once() {
        let h = harness();
        h.sender.reply(ready(Ok(())).boxed_local());

        let outcome = block_on(h.dispatcher.submit(fields()));

        assert_eq!(outcome, SubmissionOutcome::Success);
        assert_eq!(
            *h.view.calls.borrow(),
            vec![
                ViewCall::Pending(true),
                ViewCall::HideMessage,
                ViewCall::Show(SUCCESS_TEXT.into(), MessageKind::Success),
                ViewCall::Reset,
                ViewCall::Pending(false),
            ]
        );
        assert_eq!(h.tracker.names(), vec![tracking::CONTACT_FORM_SUCCESS]);
        assert_eq!(
            h.tracker.props(tracking::CONTACT_FORM_SUCCESS),
            Some(json!({ "business_type": "ristorante", "has_phone": "yes" }))
        );
    }

    #[test]
    fn sentinel_phone_is_reported_as_missing() {
        let h = harness();
        h.sender.reply(ready(Ok(())).boxed_local());

        block_on(h.dispatcher.submit(ContactFields { phone: String::new(), ..fields() }));

        assert_eq!(h.sender.sent.borrow()[0].phone, "Non fornito");
        assert_eq!(
            h.tracker.props(tracking::CONTACT_FORM_SUCCESS),
            Some(json!({ "business_type": "ristorante", "has_phone": "no" }))
        );
    }

    #[test]
    fn failure_keeps_fields_and_tracks_once() {
        let h = harness();
        h.sender.reply(
            ready(Err(DeliveryError::Rejected {
                status: 400,
                body: "The template ID is invalid".into(),
            }))
            .boxed_local(),
        );

        let outcome = block_on(h.dispatcher.submit(fields()));

        assert!(matches!(outcome, SubmissionOutcome::Failure(reason) if reason.contains("400")));
        assert_eq!(h.view.count(&ViewCall::Reset), 0);
        assert_eq!(h.view.count(&ViewCall::Show(FAILURE_TEXT.into(), MessageKind::Error)), 1);
        assert_eq!(h.view.count(&ViewCall::Pending(false)), 1);
        assert_eq!(h.tracker.names(), vec![tracking::CONTACT_FORM_ERROR]);
        assert_eq!(
            h.tracker.props(tracking::CONTACT_FORM_ERROR),
            Some(json!({ "error_type": "emailjs_error" }))
        );
    }

    #[test]
    fn resubmit_while_sending_is_ignored() {
        let h = harness();
        let (tx, rx) = oneshot::channel::<Result<(), DeliveryError>>();
        h.sender.reply(async move { rx.await.expect("reply sent") }.boxed_local());

        let mut first = Box::pin(h.dispatcher.submit(fields()));
        assert!(first.as_mut().now_or_never().is_none());
        assert_eq!(
            h.dispatcher.submit(fields()).now_or_never(),
            Some(SubmissionOutcome::Pending)
        );

        tx.send(Ok(())).expect("dispatcher waiting");
        assert_eq!(block_on(first), SubmissionOutcome::Success);

        assert_eq!(h.sender.sent.borrow().len(), 1);
        assert_eq!(h.view.count(&ViewCall::Pending(true)), 1);
        assert_eq!(h.view.count(&ViewCall::Pending(false)), 1);
        assert_eq!(h.tracker.count(tracking::CONTACT_FORM_SUCCESS), 1);
    }
}
