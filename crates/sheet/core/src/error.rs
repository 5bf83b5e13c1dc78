//! Common error infrastructure for sheet-core.
//!
//! Domain-specific errors (e.g. [`TemplateError`](crate::template::TemplateError))
//! live next to the code that raises them. Most sheet operations are total:
//! bad user input is coerced or ignored rather than reported, so the error
//! surface of this crate is deliberately small.

/// Severity level of an error, used by hosts to decide how loudly to report it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller can fall back to a sensible default and keep rendering.
    ///
    /// Examples: template that references a missing value, unreadable store.
    Recoverable,

    /// Authoring error in a block; that one block cannot render.
    ///
    /// Examples: a stateful widget without a `state_key`.
    Configuration,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Configuration => "configuration",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for sheet errors.
pub trait SheetError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the variant, useful in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
