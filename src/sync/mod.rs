//! The interaction & synchronization core.
//!
//! Four mechanisms sharing one problem: keeping a locally displayed state
//! consistent with an asynchronous, fallible, eventually-confirmed remote
//! state.
//!
//! - toggle: optimistic like/follow/bookmark with rollback
//! - autosave: debounced draft persistence with change detection
//! - feed: accumulating infinite-scroll pagination
//! - poll: periodic notification polling, one-shot view tracking
//! - timer: the cancel-and-reschedule wakeup primitive behind the deadlines
//!
//! Everything runs under one logical thread of control. Machines take
//! `&mut self` plus an explicit `Instant`; completion order of remote calls
//! is resolved by last-completion-wins per the toggle rules.

pub mod autosave;
pub mod feed;
pub mod poll;
pub mod timer;
pub mod toggle;

pub use autosave::{Autosave, SaveStatus};
pub use feed::{Feed, FeedAccumulator, PageRequest};
pub use poll::{NotificationPoller, ViewTracker};
pub use timer::WakeupTimer;
pub use toggle::{OptimisticToggle, ToggleError, ToggleState, Toggler};
