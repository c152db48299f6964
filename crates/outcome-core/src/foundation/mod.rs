//! Foundation layer: the value types every other layer builds on.

pub mod error;
pub mod identity;
pub mod outcome;
pub mod payload;
pub mod symbol;
