// Error types for enrichment calls and the creation flow.

use thiserror::Error;

use kidcatch_mapping::ConfigError;

use crate::config::EnrichmentStatus;

/// A live enrichment call that did not produce text. Always recoverable: the
/// guide logs it and uses the static fallback.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("enrichment not configured (status: {0})")]
    NotConfigured(EnrichmentStatus),

    #[error("enrichment request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("enrichment service returned HTTP {0}")]
    Status(u16),

    #[error("malformed enrichment response: {0}")]
    MalformedResponse(String),
}

/// Rejected creation-flow input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("answer is empty")]
    EmptyAnswer,

    #[error("creation flow is already complete")]
    AlreadyComplete,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, EnrichError>;
