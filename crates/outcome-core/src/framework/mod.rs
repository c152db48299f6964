//! Framework layer: event matching and handler dispatch on outcomes.

pub mod dispatch;
pub mod event;
