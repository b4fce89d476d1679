//! Owner-aware mutable slots for controller state.
//!
//! The async drivers never hold a borrow across an `.await`; they apply small
//! mutations through [`StateCell::update_with`]. When the owning view is gone
//! the mutation is skipped and `None` comes back, which is how responses for
//! unmounted views are dropped.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub trait StateCell<T> {
    /// Apply `f` to the current value. Returns `None` when the owner is gone.
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T> StateCell<T> for Rc<RefCell<T>> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<T> StateCell<T> for Weak<RefCell<T>> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let strong = self.upgrade()?;
        let mut value = strong.borrow_mut();
        Some(f(&mut value))
    }
}
