#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod remote;
pub mod sync;
pub mod telemetry;

pub use error::{Error, Transience};
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    BlogId, CommentId, CommentNode, CommentRecord, CoreError, DraftFields, InvalidId, Slug,
    Timestamp, UserId, build_thread,
};
pub use crate::remote::{
    CommentSource, DraftReceipt, DraftRemote, NotificationFeed, PageFetcher, RemoteError,
    ToggleAck, ToggleRemote,
};
pub use crate::sync::{
    Autosave, FeedAccumulator, NotificationPoller, OptimisticToggle, SaveStatus, ToggleState,
};
