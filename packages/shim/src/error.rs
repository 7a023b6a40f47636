//! Error types for the shim layer.

/// Errors from wrapping records or loading configuration.
///
/// Legacy field access is never an error; it is reported through a
/// [`DiagnosticSink`](crate::DiagnosticSink) and the access still succeeds.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Error from the core layer.
    #[error(transparent)]
    Core(#[from] paramshim_core::Error),

    /// An internal invariant was broken. This is a bug in the caller of the
    /// failing function, not bad input.
    #[error("invariant: {message}")]
    Invariant { message: String },

    /// Configuration could not be loaded.
    #[error("config error: {message}")]
    Config { message: String },
}

impl Error {
    pub fn invariant(message: impl Into<String>) -> Self {
        Error::Invariant {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
