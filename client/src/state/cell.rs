//! [`StateCell`] over Leptos signals.
//!
//! DESIGN
//! ======
//! `try_update` returns `None` once the owning view has been disposed. The
//! drivers in `analysis` treat that as "view gone" and drop the response, so
//! an unmounted panel is never written to.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use analysis::cell::StateCell;
use leptos::prelude::*;

/// Owner-aware handle to a signal holding controller state.
#[derive(Clone, Copy, Debug)]
pub struct SignalCell<S>(pub S);

impl<S, T> StateCell<T> for SignalCell<S>
where
    S: Update<Value = T>,
{
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}
