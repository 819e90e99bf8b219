/// Show/hide flag shared by a trigger and its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleState {
    active: bool,
}

impl ToggleState {
    pub fn new(active: bool) -> Self {
        Self { active }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn flip(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub fn close(&mut self) {
        self.active = false;
    }
}

/// Threshold-driven visibility. Strictly greater than the threshold shows.
pub fn past_threshold(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqAction {
    Open,
    Close,
}

impl FaqAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaqAction::Open => "open",
            FaqAction::Close => "close",
        }
    }
}

/// FAQ accordion: at most one item expanded at a time.
#[derive(Debug, Clone)]
pub struct Accordion {
    len: usize,
    expanded: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize, expanded: Option<usize>) -> Self {
        Self {
            len,
            expanded: expanded.filter(|&index| index < len),
        }
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }

    /// Clicking the open item closes it, clicking any other item opens it
    /// and collapses the rest. Out of range clicks are ignored.
    pub fn toggle(&mut self, index: usize) -> Option<FaqAction> {
        if index >= self.len {
            return None;
        }
        if self.expanded == Some(index) {
            self.expanded = None;
            Some(FaqAction::Close)
        } else {
            self.expanded = Some(index);
            Some(FaqAction::Open)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn flip_and_close() {
        let mut state = ToggleState::default();
        assert!(state.flip());
        assert!(state.is_active());
        state.close();
        assert!(!state.is_active());
        state.close();
        assert!(!state.is_active());
    }

    #[test]
    fn floating_button_threshold() {
        assert!(past_threshold(150.0, 100.0));
        assert!(!past_threshold(50.0, 100.0));
        assert!(!past_threshold(100.0, 100.0));
    }

    #[test]
    fn repeated_offsets_give_the_same_answer() {
        let first = past_threshold(150.0, 100.0);
        for _ in 0..5 {
            assert_eq!(past_threshold(150.0, 100.0), first);
        }
    }

    #[test]
    fn opening_b_collapses_a() {
        let mut faq = Accordion::new(3, None);
        assert_eq!(faq.toggle(0), Some(FaqAction::Open));
        assert_eq!(faq.toggle(1), Some(FaqAction::Open));
        assert!(!faq.is_expanded(0));
        assert!(faq.is_expanded(1));
        assert_eq!(faq.toggle(1), Some(FaqAction::Close));
        assert_eq!(faq.expanded(), None);
    }

    #[test]
    fn out_of_range_click_is_ignored() {
        let mut faq = Accordion::new(2, Some(5));
        assert_eq!(faq.expanded(), None);
        assert_eq!(faq.toggle(2), None);
        assert_eq!(faq.expanded(), None);
    }

    proptest! {
        #[test]
        fn even_flips_restore_initial(initial in any::<bool>(), pairs in 0usize..50) {
            let mut state = ToggleState::new(initial);
            for _ in 0..pairs * 2 {
                state.flip();
            }
            prop_assert_eq!(state.is_active(), initial);
        }

        #[test]
        fn at_most_one_item_expanded(clicks in proptest::collection::vec(0usize..8, 0..40)) {
            let mut faq = Accordion::new(6, None);
            for index in clicks {
                faq.toggle(index);
                let open = (0..8).filter(|&i| faq.is_expanded(i)).count();
                prop_assert!(open <= 1);
            }
        }
    }
}
