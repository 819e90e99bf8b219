use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, FormData, HtmlAnchorElement, HtmlElement, HtmlFormElement,
    ScrollLogicalPosition,
};

use crate::audit::{AuditInput, AuditReport, AuditRunner, AuditView, RandSampler, SimulatedAudit};
use crate::config;
use crate::dom::{self, Bindings, ButtonAffordance};
use crate::pending::PendingView;
use crate::tracking::Tracker;

/// Result panel under the audit form.
struct AuditPanel {
    button: ButtonAffordance,
    results: HtmlElement,
    ranking: Element,
    listing: Element,
    speed: Element,
    score: Element,
    advice: Element,
    whatsapp: HtmlAnchorElement,
}

impl AuditPanel {
    fn locate(document: &Document) -> Option<Self> {
        Some(Self {
            button: ButtonAffordance::locate(document, "auditSubmitBtn")?,
            results: dom::by_id(document, "auditResults")?,
            ranking: dom::by_id(document, "googleRanking")?,
            listing: dom::by_id(document, "gmbStatus")?,
            speed: dom::by_id(document, "siteSpeed")?,
            score: dom::by_id(document, "seoScore")?,
            advice: dom::by_id(document, "auditMessage")?,
            whatsapp: dom::by_id(document, "auditWhatsAppBtn")?,
        })
    }
}

impl PendingView for AuditPanel {
    fn set_pending(&self, pending: bool) {
        self.button.set_pending(pending);
    }
}

impl AuditView for AuditPanel {
    fn render(&self, report: &AuditReport) {
        let result = &report.result;
        let tier = result.tier();

        self.ranking.set_text_content(Some(&result.ranking_label()));
        self.listing.set_text_content(Some(result.listing.label()));
        self.speed.set_text_content(Some(&result.speed_label()));
        self.score.set_text_content(Some(&result.score_label()));
        self.score
            .set_class_name(&format!("result-value {}", tier.css_class()));

        self.whatsapp.set_href(&report.whatsapp_link());
        self.advice.set_text_content(Some(tier.advice()));

        dom::set_display(&self.results, "block");
        dom::scroll_into_view(&self.results, ScrollLogicalPosition::Center);
    }
}

/// The free SEO audit form.
pub struct AuditForm {
    form: HtmlFormElement,
    panel: AuditPanel,
}

impl AuditForm {
    pub fn locate(document: &Document) -> Option<Self> {
        Some(Self {
            form: dom::by_id(document, "seoAuditForm")?,
            panel: AuditPanel::locate(document)?,
        })
    }

    pub fn bind(self, bindings: &mut Bindings, tracker: &Rc<dyn Tracker>) {
        let whatsapp = self.panel.whatsapp.clone();
        let service = SimulatedAudit::new(RandSampler::from_browser(), config::AUDIT_DELAY_MS);
        let runner = Rc::new(AuditRunner::new(service, self.panel, tracker.clone()));

        {
            let form = self.form.clone();
            let runner = runner.clone();
            bindings.listen(&self.form, "submit", move |event| {
                event.prevent_default();
                let Ok(data) = FormData::new_with_form(&form) else {
                    return;
                };
                let input = AuditInput {
                    website: dom::form_value(&data, "website"),
                    restaurant: dom::form_value(&data, "restaurant"),
                    city: dom::form_value(&data, "city"),
                    email: dom::form_value(&data, "email"),
                };
                let runner = runner.clone();
                spawn_local(async move {
                    runner.run(input).await;
                });
            });
        }

        bindings.listen(&whatsapp, "click", move |_| runner.track_link_click());
    }
}
