use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VerdantError {
    #[error("reagent '{reagent}' has no entry in the reagent library")]
    MissingReagentFactor { reagent: String },

    #[error("invalid decision path for {evaluator}: {reason}")]
    InvalidDecisionPath {
        evaluator: &'static str,
        reason: String,
    },

    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    #[error("no volume data: every gradient step has a flow rate of 0 mL/min")]
    NoVolumeData,

    #[error("invalid {slot} weight vector: {reason}")]
    InvalidWeightVector { slot: String, reason: String },

    #[error("unknown {slot} weight scheme '{name}'. Available: {available}")]
    UnknownScheme {
        slot: String,
        name: String,
        available: String,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load reagent library from {path}: {reason}")]
    LibraryLoad { path: PathBuf, reason: String },

    #[error("invalid reagent library: {0}")]
    LibraryInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VerdantError {
    /// Stable machine-readable error kind, paired with the display text when
    /// a caller needs a structured rejection.
    pub fn kind(&self) -> &'static str {
        match self {
            VerdantError::MissingReagentFactor { .. } => "missing_reagent_factor",
            VerdantError::InvalidDecisionPath { .. } => "invalid_decision_path",
            VerdantError::InvalidGradient(_) => "invalid_gradient",
            VerdantError::NoVolumeData => "no_volume_data",
            VerdantError::InvalidWeightVector { .. } => "invalid_weight_vector",
            VerdantError::UnknownScheme { .. } => "unknown_scheme",
            VerdantError::InvalidRequest(_) => "invalid_request",
            VerdantError::InvalidConfig(_) => "invalid_config",
            VerdantError::LibraryLoad { .. } => "library_load",
            VerdantError::LibraryInvalid(_) => "library_invalid",
            VerdantError::Io(_) => "io",
            VerdantError::Json(_) => "json",
        }
    }
}
