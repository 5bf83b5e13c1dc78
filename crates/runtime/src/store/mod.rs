//! Persistence layer for widget state.
//!
//! A store maps opaque state keys (chosen by the note author) to JSON values.
//! Each stateful widget owns one key. Static block content never goes through
//! a store; it is re-parsed from the note on every render.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::KeyValueStore;
