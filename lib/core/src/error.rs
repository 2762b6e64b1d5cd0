use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Profile cannot be aligned to the feature schema: {0}")]
    SchemaMismatch(String),

    #[error("Invalid {context} dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Reference row {row} is missing feature column '{feature}'")]
    MissingFeature { row: usize, feature: String },

    #[error("Reference dataset is empty, nothing to rank")]
    EmptyDataset,

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Failed to load artifact '{artifact}': {reason}")]
    ArtifactLoad { artifact: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn dimension(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            actual,
        }
    }

    pub fn artifact(artifact: impl Into<String>, reason: impl ToString) -> Self {
        Self::ArtifactLoad {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }

    /// Coarse category reported to callers alongside the message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SchemaMismatch(_) => ErrorKind::SchemaMismatch,
            Error::DimensionMismatch { .. } | Error::MissingFeature { .. } => {
                ErrorKind::DimensionMismatch
            }
            Error::EmptyDataset => ErrorKind::EmptyDataset,
            Error::Prediction(_) => ErrorKind::PredictionError,
            Error::ArtifactLoad { .. }
            | Error::Io(_)
            | Error::Serialization(_)
            | Error::InvalidConfig(_) => ErrorKind::ArtifactLoadError,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    SchemaMismatch,
    DimensionMismatch,
    EmptyDataset,
    PredictionError,
    ArtifactLoadError,
}
