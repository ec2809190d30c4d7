use thiserror::Error;

/// Failures that are not validation findings.
///
/// Rule violations are always reported through `ValidationResult`; this type
/// only covers configuration, I/O and programmer errors.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),
    /// The wizard has no step with this identifier.
    #[error("invalid wizard step: {0}")]
    InvalidStep(String),
    /// The value is not one of the six plan lifecycle states.
    #[error("unknown plan status: {0}")]
    UnknownStatus(String),
}

/// Convenience alias for results returned by studyplan crates.
pub type Result<T> = std::result::Result<T, PlanError>;
