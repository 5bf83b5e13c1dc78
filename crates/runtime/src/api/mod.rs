//! Public runtime API surface.
//!
//! This module gathers the types exposed to hosts so the store, widget, and
//! view layers can stay focused on their own concerns.

pub mod errors;

pub use errors::{Result, RuntimeError};
