//! Error hierarchy for the taskbot service layer.
//!
//! Three layers, built on [`thiserror`]:
//!
//! - [`ValidationError`]: caller-input violations, raised before storage is
//!   touched
//! - [`RepositoryError`]: the sentinels crossing the storage contract
//!   boundary
//! - [`ServiceError`]: what service callers see; repository `NotFound` is
//!   remapped uniformly at every read/update entry point, everything else
//!   passes through opaquely
//!
//! Callers check errors by kind (`matches!`), never by identity.

use thiserror::Error;

/// Caller-input violation detected before any storage call.
///
/// Creation checks collect every violated required-field rule into one
/// [`ValidationError::EmptyRequiredFields`]; update checks fail on the
/// first violated rule.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were missing on a create call. Carries
    /// every missing field, not just the first.
    #[error("some required fields are empty: [{}]", .0.join(", "))]
    EmptyRequiredFields(Vec<&'static str>),

    /// The identifying field of an update call was missing.
    #[error("{0} is a required field")]
    MissingId(&'static str),

    /// A field explicitly marked as set carried an empty value.
    #[error("field '{0}' can't be empty")]
    EmptyField(&'static str),

    /// An update call marked no field as set.
    #[error("at least one field must be set for an update")]
    NothingToUpdate,

    /// A date search carried neither a lower nor an upper bound.
    #[error("at least one of 'from'/'to' must be set")]
    MissingSearchBounds,
}

/// Sentinels surfaced by the storage contracts.
///
/// Anything a backend cannot express as `NotFound` or `AlreadyExists` is
/// carried opaquely in [`RepositoryError::Storage`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The requested entity does not exist.
    #[error("not found")]
    NotFound,

    /// A unique constraint was violated.
    #[error("already exists")]
    AlreadyExists,

    /// Any other storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Error type returned by every service operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Caller input violated a validation rule; storage was not touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The entity addressed by the call does not exist.
    #[error("not found")]
    NotFound,

    /// The entity conflicts with an existing one.
    #[error("already exists")]
    AlreadyExists,

    /// Opaque storage failure, returned unmodified. Callers cannot
    /// distinguish transient from permanent failures at this layer; retry
    /// policy belongs to the transport/dispatcher above it.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::AlreadyExists => Self::AlreadyExists,
            RepositoryError::Storage(message) => Self::Storage(message),
        }
    }
}
