//! Glue between Leptos signals and the `analysis` controllers.

pub mod cell;
