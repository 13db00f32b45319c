//! Core capability errors (parsing, validation).
//!
//! These are bounded and stable: core errors represent domain/refusal states,
//! not library implementation details.

use thiserror::Error;

use crate::error::Transience;

/// Invalid ID.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum InvalidId {
    #[error("user id `{raw}` is invalid: {reason}")]
    User { raw: String, reason: String },
    #[error("blog id `{raw}` is invalid: {reason}")]
    Blog { raw: String, reason: String },
    #[error("comment id `{raw}` is invalid: {reason}")]
    Comment { raw: String, reason: String },
}

/// Invalid slug string.
#[derive(Debug, Error, Clone)]
#[error("slug `{raw}` is invalid: {reason}")]
pub struct InvalidSlug {
    pub raw: String,
    pub reason: String,
}

/// Canonical core error.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    #[error(transparent)]
    InvalidSlug(#[from] InvalidSlug),
}

impl CoreError {
    /// Validation failures never succeed on retry with the same input.
    pub fn transience(&self) -> Transience {
        Transience::Permanent
    }
}
