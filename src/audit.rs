//! Free SEO audit.
//!
//! The audit is simulated: [`SimulatedAudit`] waits a fixed delay and then
//! draws plausible numbers, nudged by a couple of cheap signals from the
//! website address. Rendering and tracking go through [`AuditRunner`], which
//! only sees the [`AuditService`] seam, so a real analysis can replace the
//! simulation without touching the page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use web_sys::js_sys;

use crate::config;
use crate::pending::{PendingGuard, PendingView};
use crate::tracking::{self, Tracker};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditInput {
    pub website: String,
    pub restaurant: String,
    pub city: String,
    pub email: String,
}

/// Google Business Profile listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Found,
    NotFound,
}

impl ListingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ListingStatus::Found => "Trovato",
            ListingStatus::NotFound => "Non trovato",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditResult {
    pub ranking_position: u8,
    pub listing: ListingStatus,
    pub site_speed: u8,
    pub seo_score: u8,
}

impl AuditResult {
    pub fn ranking_label(&self) -> String {
        if self.ranking_position > 10 {
            "Non in top 10".to_string()
        } else {
            format!("#{}", self.ranking_position)
        }
    }

    pub fn speed_label(&self) -> String {
        format!("{}/100", self.site_speed)
    }

    pub fn score_label(&self) -> String {
        format!("{}/100", self.seo_score)
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.seo_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Poor,
    Average,
    Good,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        if score < 60 {
            ScoreTier::Poor
        } else if score < 80 {
            ScoreTier::Average
        } else {
            ScoreTier::Good
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreTier::Poor => "poor",
            ScoreTier::Average => "average",
            ScoreTier::Good => "good",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            ScoreTier::Poor => "⚠️ Il tuo ristorante ha bisogno di ottimizzazioni urgenti per essere trovato online. Contattaci per un piano di miglioramento personalizzato.",
            ScoreTier::Average => "📈 Buoni risultati ma c'è margine di miglioramento. Possiamo aiutarti a raggiungere la top 3 di Google.",
            ScoreTier::Good => "🎉 Ottimi risultati! Il tuo ristorante è ben posizionato. Contattaci per strategie avanzate di crescita.",
        }
    }
}

/// Source of uniform draws in `[0, 1)`.
pub trait Sampler {
    fn next_unit(&mut self) -> f64;
}

pub struct RandSampler<R>(pub R);

impl<R: Rng> Sampler for RandSampler<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

impl RandSampler<StdRng> {
    /// Seeds from the browser's `Math.random` and clock.
    pub fn from_browser() -> Self {
        let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let seed = noise ^ ((js_sys::Date::now() as u64) << 16);
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Draws an integer uniformly from `offset..offset + span`.
fn draw(sampler: &mut dyn Sampler, span: u32, offset: u32) -> u32 {
    (sampler.next_unit() * span as f64).floor() as u32 + offset
}

/// Base score plus website bonuses, capped at 100.
pub fn composite_score(base: u32, website: &str, domain_age: f64) -> u8 {
    let mut score = base;
    if website.contains("https://") {
        score += 10;
    }
    if website.contains("www.") {
        score += 5;
    }
    if domain_age > 0.7 {
        score += 15;
    }
    score.min(100) as u8
}

pub trait AuditService {
    fn analyze(&self, input: &AuditInput) -> LocalBoxFuture<'_, AuditResult>;
}

pub struct SimulatedAudit<S> {
    sampler: RefCell<S>,
    delay_ms: u32,
}

impl<S: Sampler> SimulatedAudit<S> {
    pub fn new(sampler: S, delay_ms: u32) -> Self {
        Self {
            sampler: RefCell::new(sampler),
            delay_ms,
        }
    }

    pub fn sample(&self, website: &str) -> AuditResult {
        let mut sampler = self.sampler.borrow_mut();
        let sampler: &mut dyn Sampler = &mut *sampler;

        let domain_age = sampler.next_unit();
        let ranking_position = draw(sampler, 20, 1) as u8;
        let listing = if sampler.next_unit() > 0.6 {
            ListingStatus::Found
        } else {
            ListingStatus::NotFound
        };
        let site_speed = draw(sampler, 40, 60) as u8;
        let base = draw(sampler, 30, 40);

        AuditResult {
            ranking_position,
            listing,
            site_speed,
            seo_score: composite_score(base, website, domain_age),
        }
    }
}

impl<S: Sampler> AuditService for SimulatedAudit<S> {
    fn analyze(&self, input: &AuditInput) -> LocalBoxFuture<'_, AuditResult> {
        let website = input.website.clone();
        async move {
            TimeoutFuture::new(self.delay_ms).await;
            self.sample(&website)
        }
        .boxed_local()
    }
}

pub fn outreach_message(input: &AuditInput) -> String {
    format!(
        "Ciao! Ho fatto l'analisi SEO gratuita per il mio ristorante \"{}\" a {}. I risultati mostrano che posso migliorare molto. Vorrei sapere come potete aiutarmi. Email: {}",
        input.restaurant, input.city, input.email
    )
}

pub fn whatsapp_link(text: &str) -> String {
    format!(
        "https://wa.me/+{}?text={}",
        config::WHATSAPP_NUMBER,
        urlencoding::encode(text)
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    pub input: AuditInput,
    pub result: AuditResult,
}

impl AuditReport {
    pub fn whatsapp_link(&self) -> String {
        whatsapp_link(&outreach_message(&self.input))
    }
}

pub trait AuditView: PendingView {
    fn render(&self, report: &AuditReport);
}

pub struct AuditRunner<A, V> {
    service: A,
    view: V,
    tracker: Rc<dyn Tracker>,
    in_flight: Cell<bool>,
    latest: RefCell<Option<AuditReport>>,
}

impl<A: AuditService, V: AuditView> AuditRunner<A, V> {
    pub fn new(service: A, view: V, tracker: Rc<dyn Tracker>) -> Self {
        Self {
            service,
            view,
            tracker,
            in_flight: Cell::new(false),
            latest: RefCell::new(None),
        }
    }

    /// Runs one audit and renders it. Returns `None` without doing anything
    /// while another audit is still running.
    pub async fn run(&self, input: AuditInput) -> Option<AuditResult> {
        let Some(guard) = PendingGuard::acquire(&self.in_flight, &self.view) else {
            log::debug!("Audit already running, ignoring submit");
            return None;
        };

        self.tracker.emit(
            tracking::SEO_AUDIT_START,
            json!({
                "restaurant_name": input.restaurant,
                "city": input.city,
                "website": input.website,
            }),
        );

        let result = self.service.analyze(&input).await;
        let report = AuditReport { input, result };
        self.view.render(&report);
        drop(guard);

        self.tracker.emit(
            tracking::SEO_AUDIT_COMPLETE,
            json!({
                "restaurant_name": report.input.restaurant,
                "city": report.input.city,
                "seo_score": result.score_label(),
            }),
        );
        log::info!("Audit finished with score {}", result.seo_score);

        *self.latest.borrow_mut() = Some(report);
        Some(result)
    }

    /// Reports a click on the generated WhatsApp link for the latest audit.
    pub fn track_link_click(&self) {
        if let Some(report) = self.latest.borrow().as_ref() {
            self.tracker.emit(
                tracking::AUDIT_WHATSAPP_CLICK,
                json!({
                    "restaurant_name": report.input.restaurant,
                    "city": report.input.city,
                    "seo_score": report.result.seo_score,
                }),
            );
        }
    }
}
