//! Procedural macros for the Outcome library.
//!
//! This crate provides:
//!
//! - `#[adapter(name)]` - Registers a conversion function as a built-in adapter
//!
//! # Built-in Adapters
//!
//! A built-in adapter is a plain function from `outcome_core::Callback` to
//! `outcome_core::Outcome`. The attribute adds it to the link-time registry
//! that `AdapterRegistry::with_builtins()` reads:
//!
//! ```rust,ignore
//! use outcome_core::{adapter, Callback, Outcome};
//!
//! #[adapter(boolean)]
//! fn boolean(callback: Callback<'_>) -> Outcome {
//!     match callback() {
//!         Ok(Some(value)) if value.downcast_ref::<bool>() == Some(&true) => Outcome::success(),
//!         _ => Outcome::failure(),
//!     }
//! }
//! ```

mod adapter;

use proc_macro::TokenStream;

/// Registers the decorated function as a built-in adapter named `name`.
///
/// The name must be a plain identifier. The function must take exactly one
/// `outcome_core::Callback` argument and return `outcome_core::Outcome`.
#[proc_macro_attribute]
pub fn adapter(attr: TokenStream, item: TokenStream) -> TokenStream {
    adapter::adapter(attr, item)
}
