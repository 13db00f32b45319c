//! Optimistic toggle controller for binary relations.
//!
//! Liked/unliked, following/not-following, bookmarked/not-bookmarked all
//! share one contract: flip locally the instant the user acts, then confirm
//! or roll back when the remote settles. The machine is explicit about its
//! two phases (settled, pending-with-prediction) rather than juggling ad
//! hoc flags.

use thiserror::Error;
use tracing::{debug, warn};

use crate::remote::{RemoteError, ToggleAck, ToggleRemote};

/// User-relative membership flag plus optional aggregate (like count).
///
/// Owned exclusively by the controller instance bound to one
/// (subject, relation) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleState {
    pub active: bool,
    pub count: Option<u64>,
}

impl ToggleState {
    /// Relation without an aggregate (follow, bookmark).
    pub fn flag(active: bool) -> Self {
        Self {
            active,
            count: None,
        }
    }

    /// Relation with an aggregate (like + like count).
    pub fn counted(active: bool, count: u64) -> Self {
        Self {
            active,
            count: Some(count),
        }
    }

    /// Apply the aggregate delta for a transition from `from_active`.
    fn with_transition(self, from_active: bool, to_active: bool) -> Self {
        let count = self.count.map(|c| {
            if from_active == to_active {
                c
            } else if to_active {
                c.saturating_add(1)
            } else {
                c.saturating_sub(1)
            }
        });
        Self {
            active: to_active,
            count,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToggleError {
    /// A previous invoke has not settled yet. The UI disables the control
    /// while pending; a second invoke is refused rather than issued with
    /// undefined ordering.
    #[error("toggle already in flight")]
    Pending,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Settled,
    /// Remote call outstanding; `prior` is the rollback point.
    Pending { prior: ToggleState },
}

/// The optimistic toggle state machine.
///
/// `begin` / `complete_success` / `complete_failure` let a driver issue the
/// remote call however it likes; [`Toggler`] wires the machine to a
/// [`ToggleRemote`] for the common synchronous-driver case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticToggle {
    state: ToggleState,
    phase: Phase,
}

impl OptimisticToggle {
    pub fn new(initial: ToggleState) -> Self {
        Self {
            state: initial,
            phase: Phase::Settled,
        }
    }

    /// The state to display right now (prediction included while pending).
    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Flip locally and enter the pending phase.
    ///
    /// Returns the predicted state the UI should show immediately. Refused
    /// while a previous invoke is still pending.
    pub fn begin(&mut self) -> Result<ToggleState, ToggleError> {
        if self.is_pending() {
            return Err(ToggleError::Pending);
        }
        let prior = self.state;
        self.state = prior.with_transition(prior.active, !prior.active);
        self.phase = Phase::Pending { prior };
        Ok(self.state)
    }

    /// Settle with the server-confirmed flag. Server wins: when the
    /// confirmation contradicts the prediction (a concurrent flip from
    /// another session), the displayed state converges to server truth and
    /// the aggregate is re-derived from the rollback point.
    pub fn complete_success(&mut self, ack: ToggleAck) -> ToggleState {
        let Phase::Pending { prior } = self.phase else {
            // Stale completion after the machine already settled; the
            // current state is already authoritative.
            return self.state;
        };
        if ack.active != self.state.active {
            debug!(
                predicted = self.state.active,
                confirmed = ack.active,
                "toggle prediction contradicted; adopting server state"
            );
        }
        self.state = prior.with_transition(prior.active, ack.active);
        self.phase = Phase::Settled;
        self.state
    }

    /// Settle by rolling back to the pre-invocation state.
    pub fn complete_failure(&mut self) -> ToggleState {
        if let Phase::Pending { prior } = self.phase {
            self.state = prior;
            self.phase = Phase::Settled;
        }
        self.state
    }
}

/// Machine plus remote: one call per user action.
///
/// Display responsibility for the returned error (toast, inline message)
/// stays with the caller. No automatic retries - the user re-invokes.
pub struct Toggler<R: ToggleRemote> {
    machine: OptimisticToggle,
    remote: R,
}

impl<R: ToggleRemote> Toggler<R> {
    pub fn new(initial: ToggleState, remote: R) -> Self {
        Self {
            machine: OptimisticToggle::new(initial),
            remote,
        }
    }

    pub fn state(&self) -> ToggleState {
        self.machine.state()
    }

    pub fn is_pending(&self) -> bool {
        self.machine.is_pending()
    }

    /// Flip, confirm, and return the settled state; roll back and surface
    /// the error on failure.
    pub fn invoke(&mut self) -> Result<ToggleState, ToggleError> {
        self.machine.begin()?;
        match self.remote.toggle() {
            Ok(ack) => Ok(self.machine.complete_success(ack)),
            Err(err) => {
                warn!(error = %err, "toggle failed; rolling back optimistic state");
                self.machine.complete_failure();
                Err(err.into())
            }
        }
    }
}
