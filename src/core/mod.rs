//! Core domain types for inkstream
//!
//! Module hierarchy follows type dependency order:
//! - error: validation/refusal errors (Layer 0)
//! - time: wall-clock timestamps (Layer 0)
//! - identity: UserId, BlogId, CommentId, Slug (Layer 1)
//! - draft: DraftFields snapshot + slug/word-count helpers (Layer 2)
//! - comment: CommentRecord, CommentNode, thread building (Layer 2)

pub mod comment;
pub mod draft;
pub mod error;
pub mod identity;
pub mod time;

pub use comment::{CommentNode, CommentRecord, build_thread};
pub use draft::{DraftFields, reading_time_minutes, slugify, unique_slug, word_count};
pub use error::{CoreError, InvalidId, InvalidSlug};
pub use identity::{BlogId, CommentId, Slug, UserId};
pub use time::Timestamp;
