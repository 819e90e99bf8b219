use std::cell::Cell;

/// A submit control that can show a loading affordance.
pub trait PendingView {
    fn set_pending(&self, pending: bool);
}

/// Marks a submission as in flight for as long as it lives.
///
/// Acquiring switches the view to its loading affordance, dropping restores
/// it and clears the flag, on every exit path.
pub struct PendingGuard<'a> {
    flag: &'a Cell<bool>,
    view: &'a dyn PendingView,
}

impl<'a> PendingGuard<'a> {
    /// Returns `None` if a submission is already in flight.
    pub fn acquire(flag: &'a Cell<bool>, view: &'a dyn PendingView) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        view.set_pending(true);
        Some(Self { flag, view })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.view.set_pending(false);
        self.flag.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Button {
        calls: RefCell<Vec<bool>>,
    }

    impl PendingView for Button {
        fn set_pending(&self, pending: bool) {
            self.calls.borrow_mut().push(pending);
        }
    }

    #[test]
    fn guard_restores_once() {
        let flag = Cell::new(false);
        let button = Button::default();
        {
            let _guard = PendingGuard::acquire(&flag, &button).expect("free");
            assert!(flag.get());
        }
        assert!(!flag.get());
        assert_eq!(*button.calls.borrow(), vec![true, false]);
    }

    #[test]
    fn second_acquire_is_refused() {
        let flag = Cell::new(false);
        let button = Button::default();
        let guard = PendingGuard::acquire(&flag, &button);
        assert!(guard.is_some());
        assert!(PendingGuard::acquire(&flag, &button).is_none());
        drop(guard);
        assert!(PendingGuard::acquire(&flag, &button).is_some());
        assert_eq!(*button.calls.borrow(), vec![true, false, true, false]);
    }
}
