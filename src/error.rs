//! Error types shared across the engine.

use std::path::PathBuf;
use thiserror::Error;

/// A fault raised while evaluating the derived sequence.
///
/// Only one kind arises in practice: an arithmetic step produced a
/// NaN or infinite value, typically because a non-finite number was
/// placed into a [`crate::ParameterSet`] without going through
/// validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationFault {
    #[error("invalid numeric operation in step '{step}': produced {value}")]
    InvalidNumericOperation { step: &'static str, value: f64 },
}

/// Problems with a pricing table supplied from outside the crate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read pricing table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse pricing table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("pricing table has no tiers")]
    EmptyTable,
    #[error("tier threshold {threshold} does not exceed previous threshold {previous}")]
    NonIncreasingThreshold { previous: u32, threshold: u32 },
    #[error("discount rate {rate} for {min_headcount}+ users must lie in [0, 1)")]
    InvalidDiscount { min_headcount: u32, rate: f64 },
}

/// A single field that failed declarative validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
