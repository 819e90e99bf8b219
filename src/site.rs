//! Page wiring.
//!
//! [`initialize`] looks for every component on the page and binds the ones it
//! finds. A component whose markup is missing is skipped, never an error.

use std::rc::Rc;

use log::{debug, info};
use web_sys::{Document, Window};

use crate::components::{
    audit_form::AuditForm, contact_form::ContactForm, faq::Faq, floating_button::FloatingButton,
    link_tracking::LinkTracking, mobile_nav::MobileNav, popup::ExamplesPopup, reveal::Reveal,
    smooth_scroll::SmoothScroll,
};
use crate::dom::Bindings;
use crate::tracking::Tracker;

/// Keeps every listener and observer alive. Dropping it, or calling
/// [`SiteHandle::dispose`], unregisters them all.
pub struct SiteHandle {
    bindings: Bindings,
    components: Vec<&'static str>,
}

impl SiteHandle {
    pub fn components(&self) -> &[&'static str] {
        &self.components
    }

    /// Unregisters everything and returns how many listeners were removed.
    pub fn dispose(self) -> usize {
        let removed = self.bindings.listener_count();
        info!(
            "Removing {} listeners from {} components",
            removed,
            self.components.len()
        );
        removed
    }
}

struct Wiring<'a> {
    bindings: Bindings,
    components: Vec<&'static str>,
    tracker: &'a Rc<dyn Tracker>,
}

impl Wiring<'_> {
    fn mount<C>(
        &mut self,
        name: &'static str,
        component: Option<C>,
        bind: impl FnOnce(C, &mut Bindings, &Rc<dyn Tracker>),
    ) {
        match component {
            Some(component) => {
                bind(component, &mut self.bindings, self.tracker);
                self.components.push(name);
                info!("Bound {}", name);
            }
            None => debug!("No {} on this page", name),
        }
    }
}

pub fn initialize(
    window: &Window,
    document: &Document,
    tracker: Rc<dyn Tracker>,
) -> SiteHandle {
    let mut wiring = Wiring {
        bindings: Bindings::default(),
        components: Vec::new(),
        tracker: &tracker,
    };

    wiring.mount("mobile nav", MobileNav::locate(document), |c, b, _| c.bind(b));
    wiring.mount("smooth scroll", SmoothScroll::locate(document), |c, b, _| c.bind(b));
    wiring.mount("reveal", Reveal::locate(document), |c, b, _| c.bind(b));
    wiring.mount(
        "floating button",
        FloatingButton::locate(window, document),
        |c, b, _| c.bind(b),
    );
    wiring.mount("faq", Faq::locate(document), |c, b, t| c.bind(b, t));
    wiring.mount("seo audit", AuditForm::locate(document), |c, b, t| c.bind(b, t));
    wiring.mount("examples popup", ExamplesPopup::locate(document), |c, b, _| c.bind(b));
    wiring.mount("contact form", ContactForm::locate(document), |c, b, t| c.bind(b, t));
    wiring.mount("link tracking", LinkTracking::locate(document), |c, b, t| c.bind(b, t));

    SiteHandle {
        bindings: wiring.bindings,
        components: wiring.components,
    }
}
