//! Unified error types surfaced by the runtime API.
//!
//! Wraps store failures and block authoring mistakes so hosts can render an
//! error fragment for the one block that failed and keep going.
use thiserror::Error;

use sheet_core::{ErrorSeverity, SheetError};

pub use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A stateful block has nowhere to persist its state.
    ///
    /// `index` is set for blocks that mount one widget per list item.
    #[error("{}", missing_state_key(.codeblock, .index))]
    MissingStateKey {
        codeblock: &'static str,
        index: Option<usize>,
    },

    #[error("no processor registered for code block `{0}`")]
    UnknownCodeblock(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("widget state could not be encoded or decoded")]
    State(#[source] serde_json::Error),
}

impl SheetError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingStateKey { .. } | Self::UnknownCodeblock(_) => {
                ErrorSeverity::Configuration
            }
            Self::Store(_) | Self::State(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingStateKey { .. } => "RUNTIME_MISSING_STATE_KEY",
            Self::UnknownCodeblock(_) => "RUNTIME_UNKNOWN_CODEBLOCK",
            Self::Store(_) => "RUNTIME_STORE",
            Self::State(_) => "RUNTIME_STATE",
        }
    }
}

fn missing_state_key(codeblock: &str, index: &Option<usize>) -> String {
    match index {
        Some(index) => format!(
            "{} item at index {index} must contain a 'state_key' property.",
            title(codeblock)
        ),
        None => format!(
            "{} block must contain a 'state_key' property.",
            title(codeblock)
        ),
    }
}

fn title(codeblock: &str) -> String {
    let mut chars = codeblock.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
