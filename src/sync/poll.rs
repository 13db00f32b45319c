//! Periodic polling and one-shot fire-and-forget calls.
//!
//! The notification feed is polled, not streamed: a cancellable periodic
//! schedule bound to the lifetime of the surface that owns it. Same
//! injected-`Instant` protocol as the autosave machine.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::BlogId;
use crate::remote::ViewSink;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// Periodic poll schedule with an in-flight guard.
///
/// `due` hands out permission to poll; `complete` re-arms the interval from
/// the completion instant. Dropping or cancelling the poller cancels the
/// schedule - an in-flight poll still runs to completion, its result simply
/// goes unused.
#[derive(Debug, Clone)]
pub struct NotificationPoller {
    interval: Duration,
    deadline: Option<Instant>,
    in_flight: bool,
    cancelled: bool,
}

impl NotificationPoller {
    /// First poll fires immediately (the bell wants an unread count on
    /// mount), then every `interval`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            deadline: Some(now),
            in_flight: false,
            cancelled: false,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.in_flight { None } else { self.deadline }
    }

    /// Whether a poll should start now. Marks it in flight.
    pub fn due(&mut self, now: Instant) -> bool {
        if self.in_flight {
            return false;
        }
        match self.deadline {
            Some(at) if now >= at => {
                self.in_flight = true;
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// The poll settled (either way); re-arm the interval.
    pub fn complete(&mut self, now: Instant) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        if !self.cancelled {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Stop the schedule. The owning surface is going away.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.deadline = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// One-shot view-count increment per blog page mount.
///
/// Fire-and-forget: a failure is logged and never retried or surfaced -
/// view counts are not worth an error toast.
#[derive(Debug)]
pub struct ViewTracker {
    blog: BlogId,
    sent: bool,
}

impl ViewTracker {
    pub fn new(blog: BlogId) -> Self {
        Self { blog, sent: false }
    }

    /// Record the view on first call; later calls are no-ops.
    pub fn record<S: ViewSink>(&mut self, sink: &mut S) {
        if self.sent {
            return;
        }
        self.sent = true;
        if let Err(err) = sink.record_view(self.blog) {
            debug!(blog = %self.blog, error = %err, "view increment dropped");
        }
    }

    pub fn recorded(&self) -> bool {
        self.sent
    }
}
