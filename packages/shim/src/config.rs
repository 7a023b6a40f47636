//! Shim configuration: which mode is active and where diagnostics go.
//!
//! The mode is decided once, when a [`ParamsScope`](crate::ParamsScope) is
//! built, and never re-read at access time.

use std::env::VarError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{DiagnosticSink, Error, LogSink};

/// Environment variable read by [`Mode::from_env`].
pub const MODE_ENV_VAR: &str = "PARAMSHIM_ENV";

/// Whether legacy access is instrumented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every legacy access is reported through the configured sink.
    Development,
    /// Plain futures, no interception.
    #[default]
    Production,
}

impl Mode {
    /// Read the mode from [`MODE_ENV_VAR`]. Unset means production.
    pub fn from_env() -> Result<Self, Error> {
        mode_from_var(std::env::var(MODE_ENV_VAR))
    }

    pub fn is_development(self) -> bool {
        self == Mode::Development
    }
}

fn mode_from_var(var: Result<String, VarError>) -> Result<Mode, Error> {
    match var {
        Ok(value) => value.parse(),
        Err(VarError::NotPresent) => Ok(Mode::Production),
        Err(VarError::NotUnicode(_)) => Err(Error::config(format!(
            "{} contains invalid UTF-8",
            MODE_ENV_VAR
        ))),
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(Error::config(format!("unknown mode '{}'", other))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => f.write_str("development"),
            Mode::Production => f.write_str("production"),
        }
    }
}

/// Configuration threaded into every wrap.
#[derive(Clone)]
pub struct ShimConfig {
    mode: Mode,
    sink: Arc<dyn DiagnosticSink>,
}

impl ShimConfig {
    /// Configuration for `mode`, reporting through [`LogSink`].
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            sink: Arc::new(LogSink),
        }
    }

    pub fn development() -> Self {
        Self::new(Mode::Development)
    }

    pub fn production() -> Self {
        Self::new(Mode::Production)
    }

    /// Configuration with the mode taken from [`MODE_ENV_VAR`].
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(Mode::from_env()?))
    }

    /// Report diagnostics through `sink` instead.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl fmt::Debug for ShimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShimConfig")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
