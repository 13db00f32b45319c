//! Debounced autosave with content-based change detection.
//!
//! Observes a mutable draft value and persists the most recent distinct
//! value once a quiet window elapses. Earlier intermediate values inside
//! the window are discarded; an edit that lands while a save is in flight
//! is queued and coalesced into the next save rather than dropped.
//!
//! The machine owns no timers. All time arrives as `Instant` arguments and
//! due work is pulled via `next_deadline` / `take_due`, so a driver (or a
//! test) decides when "now" is. `sync::timer::WakeupTimer` turns the
//! deadlines into channel wakeups for real clients.

use std::time::{Duration, Instant};

use tracing::debug;

pub const DEFAULT_DELAY_MS: u64 = 30_000;
pub const DEFAULT_SAVED_DISPLAY_MS: u64 = 2_000;

/// Transient save status for the editor footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    /// Shown for a fixed display interval after a successful save, then
    /// decays back to `Idle` on its own.
    Saved,
    /// Sticky until the next distinct value or a successful manual save.
    Error,
}

/// Debounced autosave scheduler over any deep-comparable snapshot type.
#[derive(Debug, Clone)]
pub struct Autosave<T: Clone + PartialEq> {
    delay: Duration,
    saved_display: Duration,
    enabled: bool,
    /// Last successfully persisted value - the change-detection baseline.
    persisted: T,
    /// Latest distinct value awaiting persistence.
    pending: Option<T>,
    /// Debounce deadline for `pending`. None while a save is in flight.
    deadline: Option<Instant>,
    /// Value currently being persisted, if any.
    in_flight: Option<T>,
    failed: bool,
    saved_at: Option<Instant>,
}

impl<T: Clone + PartialEq> Autosave<T> {
    /// `baseline` is the value already persisted remotely (the loaded
    /// draft), not an edit.
    pub fn new(baseline: T, delay: Duration, saved_display: Duration) -> Self {
        Self {
            delay,
            saved_display,
            enabled: true,
            persisted: baseline,
            pending: None,
            deadline: None,
            in_flight: None,
            failed: false,
            saved_at: None,
        }
    }

    pub fn with_default_intervals(baseline: T) -> Self {
        Self::new(
            baseline,
            Duration::from_millis(DEFAULT_DELAY_MS),
            Duration::from_millis(DEFAULT_SAVED_DISPLAY_MS),
        )
    }

    /// While disabled (e.g. no draft id exists yet), values are ignored
    /// outright: this scheduler must never fabricate a create from an
    /// update-only persist function. Creating the initial resource is an
    /// explicit action outside this contract.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending = None;
            self.deadline = None;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Observe a new value from the editor.
    ///
    /// While settled, distinct values reset the quiet window and a value
    /// deep-equal to the persisted baseline disarms any pending save.
    /// While a save is in flight, every value is queued for the completion
    /// handlers to resolve. Returns whether a save is now scheduled or
    /// queued.
    pub fn update(&mut self, value: T, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        if self.in_flight.is_some() {
            // The baseline is about to become the in-flight value, so
            // comparing against `persisted` here would test a stale
            // baseline. Queue unconditionally and leave the deadline
            // unarmed; completion compares against the settled baseline
            // and re-arms or drops accordingly.
            self.failed = false;
            self.pending = Some(value);
            return true;
        }
        if value == self.persisted {
            // Edited back to the saved content: nothing to persist.
            self.pending = None;
            self.deadline = None;
            return false;
        }
        self.failed = false;
        self.pending = Some(value);
        // Debounce: only the most recent value in a quiet window is ever
        // persisted.
        self.deadline = Some(now + self.delay);
        true
    }

    /// When the driver should next call `take_due`.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Hand out the value to persist if its quiet window has elapsed.
    ///
    /// The caller owns the remote call and must report back through
    /// `complete_success` / `complete_failure`. At most one save is in
    /// flight at a time.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        let deadline = self.deadline?;
        if now < deadline || self.in_flight.is_some() {
            return None;
        }
        self.begin_save()
    }

    /// Manual "save now": bypasses the timer, still obeys the in-flight
    /// guard and change detection.
    pub fn save_now(&mut self) -> Option<T> {
        if !self.enabled || self.in_flight.is_some() {
            return None;
        }
        self.begin_save()
    }

    fn begin_save(&mut self) -> Option<T> {
        let value = self.pending.take()?;
        self.deadline = None;
        self.in_flight = Some(value.clone());
        Some(value)
    }

    /// The in-flight value is now the persisted baseline. An edit that
    /// arrived during the save re-arms the quiet window from `now`.
    pub fn complete_success(&mut self, now: Instant) {
        let Some(value) = self.in_flight.take() else {
            return;
        };
        self.persisted = value;
        self.failed = false;
        self.saved_at = Some(now);
        if let Some(pending) = self.pending.take() {
            if pending == self.persisted {
                // Edited back to exactly what was just saved.
            } else {
                debug!("edit arrived during save; coalescing into next window");
                self.pending = Some(pending);
                self.deadline = Some(now + self.delay);
            }
        }
    }

    /// The save failed. The value is not lost: unless a newer edit already
    /// superseded it, it returns to pending, where a manual save or the
    /// next distinct value picks it up. The failed value itself gets no
    /// automatic retry, but a distinct edit queued during the save is a
    /// new value and re-arms its own quiet window from `now`.
    pub fn complete_failure(&mut self, now: Instant) {
        let Some(failed_value) = self.in_flight.take() else {
            return;
        };
        self.failed = true;
        match self.pending.take() {
            Some(pending) if pending == self.persisted => {
                // Queued edit reverted to the still-current baseline.
                self.deadline = None;
            }
            Some(pending) => {
                self.pending = Some(pending);
                self.deadline = Some(now + self.delay);
            }
            None => {
                self.pending = Some(failed_value);
                self.deadline = None;
            }
        }
    }

    /// `idle -> saving -> {saved -> idle (after display interval),
    /// error -> idle (on next distinct value)}`.
    pub fn status(&self, now: Instant) -> SaveStatus {
        if self.in_flight.is_some() {
            return SaveStatus::Saving;
        }
        if self.failed {
            return SaveStatus::Error;
        }
        match self.saved_at {
            Some(at) if now.duration_since(at) < self.saved_display => SaveStatus::Saved,
            _ => SaveStatus::Idle,
        }
    }

    /// Whether an unpersisted edit exists (pending or in flight).
    pub fn is_dirty(&self) -> bool {
        self.pending.is_some() || self.in_flight.is_some()
    }

    pub fn persisted(&self) -> &T {
        &self.persisted
    }
}
