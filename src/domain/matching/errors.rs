//! Error types for the matching engine.

use thiserror::Error;

use super::VectorDefect;
use crate::domain::foundation::{DomainError, ErrorCode, MentorId, TraitId, ValidationError};

/// Errors raised by vector construction, ranking, and gap analysis.
///
/// None of these are retried: they signal a catalog or caller defect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchingError {
    #[error("Malformed vector for {context}: {defect}")]
    MalformedVector { context: String, defect: VectorDefect },

    #[error("Malformed trait '{trait_id}': {defect}")]
    MalformedTrait { trait_id: String, defect: VectorDefect },

    #[error("Cannot rank against an empty mentor pool")]
    EmptyPool,

    #[error("top_n must be at least 1")]
    InvalidTopN,

    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("Unknown trait '{0}'")]
    UnknownTrait(TraitId),

    #[error("Unknown mentor '{0}'")]
    UnknownMentor(MentorId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl MatchingError {
    /// Creates a malformed vector error with a context description.
    pub fn malformed_vector(context: impl Into<String>, defect: VectorDefect) -> Self {
        MatchingError::MalformedVector {
            context: context.into(),
            defect,
        }
    }

    /// Returns the foundation error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MatchingError::MalformedVector { .. } => ErrorCode::MalformedVector,
            MatchingError::MalformedTrait { .. } => ErrorCode::MalformedTrait,
            MatchingError::EmptyPool => ErrorCode::EmptyPool,
            MatchingError::InvalidTopN => ErrorCode::ValidationFailed,
            MatchingError::UnknownAttribute(_) => ErrorCode::UnknownAttribute,
            MatchingError::UnknownTrait(_) => ErrorCode::TraitNotFound,
            MatchingError::UnknownMentor(_) => ErrorCode::MentorNotFound,
            MatchingError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<MatchingError> for DomainError {
    fn from(err: MatchingError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Errors loading or validating catalog data (traits, mentors, remediation).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse catalog '{source_name}': {message}")]
    Parse { source_name: String, message: String },

    #[error("Invalid catalog: {0}")]
    Invalid(String),

    #[error(transparent)]
    Malformed(#[from] MatchingError),
}

impl CatalogError {
    pub fn read(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        CatalogError::Read {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn parse(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        CatalogError::Parse {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        CatalogError::Invalid(message.into())
    }
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        DomainError::new(ErrorCode::CatalogError, err.to_string())
    }
}
