//! Wakeup timer for deadline-driven machines.
//!
//! The sync machines never own timers; a driver services their
//! `next_deadline` values. `WakeupTimer` is the replace-pending-task
//! primitive that makes debounce cheap: rescheduling a token replaces its
//! pending wakeup instead of accumulating timers, and a superseded wakeup
//! is detected as stale when it arrives.
//!
//! Sleep threads exist only to deliver a token back into the single driving
//! thread over the channel; they never touch machine state.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crossbeam::channel::Sender;

/// Cancel-and-reschedule wakeups keyed by token.
pub struct WakeupTimer<T> {
    /// Pending wakeups: token -> scheduled fire time.
    pending: HashMap<T, Instant>,

    /// Channel the driving thread receives wakeups on.
    wakeup_tx: Sender<T>,
}

impl<T> WakeupTimer<T>
where
    T: Clone + Eq + Hash + Send + 'static,
{
    pub fn new(wakeup_tx: Sender<T>) -> Self {
        WakeupTimer {
            pending: HashMap::new(),
            wakeup_tx,
        }
    }

    /// Schedule a wakeup after `delay`, replacing any pending wakeup for
    /// the same token (debounce: the newest deadline wins).
    pub fn schedule(&mut self, token: T, delay: Duration) {
        let fire_at = Instant::now() + delay;
        self.pending.insert(token.clone(), fire_at);

        let tx = self.wakeup_tx.clone();
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            // Ignore send errors - receiver may have been dropped
            let _ = tx.send(token);
        });
    }

    /// Check whether a delivered wakeup is still current.
    ///
    /// Returns true and clears the entry if the token's pending deadline
    /// has been reached; a wakeup from a superseded schedule is stale and
    /// ignored.
    pub fn should_fire(&mut self, token: &T) -> bool {
        if let Some(&fire_at) = self.pending.get(token) {
            if Instant::now() >= fire_at {
                self.pending.remove(token);
                return true;
            }
        }
        false
    }

    /// Cancel a pending wakeup (cancels the scheduling, not any in-flight
    /// remote call).
    pub fn cancel(&mut self, token: &T) {
        self.pending.remove(token);
    }

    pub fn is_pending(&self, token: &T) -> bool {
        self.pending.contains_key(token)
    }
}
