//! Integration layer: bridges from external fallible code into outcomes.

pub mod builtin;
pub mod registry;
