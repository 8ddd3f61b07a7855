//! Structured error types shared across isingmc crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`IsingError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the isingmc engine.
///
/// Rejection of a Monte Carlo move is not an error and never surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum IsingError {
    /// Invalid interaction topology, such as a site coupled to itself.
    #[error("topology error: {0}")]
    Topology(ErrorInfo),
    /// A vertex, edge or site index outside the bounds of the model.
    #[error("index error: {0}")]
    Index(ErrorInfo),
    /// Invalid construction or run parameters.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// A transition violated the sampling protocol.
    #[error("sampling error: {0}")]
    Sampling(ErrorInfo),
    /// Serialization and parsing errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl IsingError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            IsingError::Topology(info)
            | IsingError::Index(info)
            | IsingError::Config(info)
            | IsingError::Sampling(info)
            | IsingError::Serde(info) => info,
        }
    }

    /// Returns the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload, keeping the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            IsingError::Topology(info) => IsingError::Topology(info.with_context(key, value)),
            IsingError::Index(info) => IsingError::Index(info.with_context(key, value)),
            IsingError::Config(info) => IsingError::Config(info.with_context(key, value)),
            IsingError::Sampling(info) => IsingError::Sampling(info.with_context(key, value)),
            IsingError::Serde(info) => IsingError::Serde(info.with_context(key, value)),
        }
    }

    /// Builds an [`IsingError::Index`] for an index outside `0..len`.
    pub fn out_of_range(code: &str, what: &str, index: usize, len: usize) -> Self {
        IsingError::Index(
            ErrorInfo::new(code, format!("{what} index out of range"))
                .with_context("index", index)
                .with_context("len", len),
        )
    }
}
