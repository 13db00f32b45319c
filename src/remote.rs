//! Abstract collaborator boundary.
//!
//! The concrete transport/database behind these traits is out of scope:
//! the sync mechanisms are transport-agnostic by design. Implementations
//! are expected to enforce their own request timeouts and surface them as
//! `RemoteError::Transient`.

use thiserror::Error;

use crate::core::{BlogId, CommentRecord, DraftFields, Slug, Timestamp, UserId};
use crate::error::Transience;

/// Canonical remote failure taxonomy.
///
/// Bounded and stable: every backend failure the sync core can observe maps
/// onto one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RemoteError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("conflict: {reason}")]
    Conflict { reason: String },

    #[error("validation failed for field {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    #[error("transient failure: {reason}")]
    Transient { reason: String },
}

impl RemoteError {
    /// Self-follow rejection, as issued by the follow backend.
    pub fn self_follow() -> Self {
        RemoteError::Conflict {
            reason: "cannot follow yourself".into(),
        }
    }

    pub fn transience(&self) -> Transience {
        match self {
            RemoteError::Unauthorized => Transience::Permanent,
            RemoteError::NotFound => Transience::Permanent,
            RemoteError::Conflict { .. } => Transience::Permanent,
            RemoteError::ValidationFailed { .. } => Transience::Permanent,
            RemoteError::Transient { .. } => Transience::Retryable,
        }
    }
}

/// Server confirmation of a binary-relation flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleAck {
    /// The relation state as the server now holds it. Authoritative: on
    /// disagreement with the local prediction, this value wins.
    pub active: bool,
}

/// Idempotent-intent binary relation flip (like, follow, bookmark), keyed
/// implicitly by (acting user, subject).
pub trait ToggleRemote {
    fn toggle(&mut self) -> Result<ToggleAck, RemoteError>;
}

impl<F> ToggleRemote for F
where
    F: FnMut() -> Result<ToggleAck, RemoteError>,
{
    fn toggle(&mut self) -> Result<ToggleAck, RemoteError> {
        self()
    }
}

/// Receipt for a persisted draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftReceipt {
    pub id: BlogId,
    pub slug: Slug,
}

/// Update-only draft persistence. Creating the initial draft resource is an
/// explicit action outside the sync core; the autosave scheduler requires a
/// pre-existing id and never fabricates a create.
pub trait DraftRemote {
    fn persist(&mut self, id: BlogId, fields: &DraftFields) -> Result<DraftReceipt, RemoteError>;
}

/// Stable, filter-scoped, offset-paged read. Contract: a returned page is
/// strictly shorter than `page_size` only at the true end of the
/// collection - the exhaustion heuristic depends on it.
pub trait PageFetcher {
    type Item;

    fn fetch_page(&mut self, page: u32, page_size: usize) -> Result<Vec<Self::Item>, RemoteError>;
}

/// Flat comment fetch, unordered or chronologically ordered; the thread
/// builder tolerates either.
pub trait CommentSource {
    fn list(&mut self, blog: BlogId) -> Result<Vec<CommentRecord>, RemoteError>;
}

/// One notification row, as delivered by the polled feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub actor: UserId,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
}

/// Polled notification feed. No push delivery: the owning surface polls on
/// a fixed interval for the core's lifetime.
pub trait NotificationFeed {
    fn poll(&mut self, since: Option<Timestamp>) -> Result<Vec<Notification>, RemoteError>;
}

/// Fire-and-forget view-count increment.
pub trait ViewSink {
    fn record_view(&mut self, blog: BlogId) -> Result<(), RemoteError>;
}
