use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Document, Element};

use crate::dom::{self, Bindings};
use crate::toggle::ToggleState;

/// Burger button and the slide-in navigation it opens.
pub struct MobileNav {
    toggle: Element,
    nav: Element,
    links: Vec<Element>,
}

impl MobileNav {
    pub fn locate(document: &Document) -> Option<Self> {
        Some(Self {
            toggle: dom::query(document, ".mobile-menu-toggle")?,
            nav: dom::query(document, ".mobile-nav")?,
            links: dom::query_all(document, ".mobile-nav-link"),
        })
    }

    pub fn bind(self, bindings: &mut Bindings) {
        let open = self.nav.class_list().contains("active");
        let state = Rc::new(Cell::new(ToggleState::new(open)));
        let apply = {
            let toggle = self.toggle.clone();
            let nav = self.nav.clone();
            Rc::new(move |active: bool| {
                let _ = nav.class_list().toggle_with_force("active", active);
                let _ = toggle.class_list().toggle_with_force("active", active);
            })
        };

        {
            let state = state.clone();
            let apply = apply.clone();
            bindings.listen(&self.toggle, "click", move |_| {
                let mut current = state.get();
                current.flip();
                state.set(current);
                apply(current.is_active());
            });
        }

        // Picking a destination closes the menu
        for link in &self.links {
            let state = state.clone();
            let apply = apply.clone();
            bindings.listen(link, "click", move |_| {
                let mut current = state.get();
                current.close();
                state.set(current);
                apply(current.is_active());
            });
        }
    }
}
