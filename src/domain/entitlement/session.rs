//! Per-session subscription state machine.
//!
//! A [`SubscriptionSession`] tracks one consuming surface's view of a
//! user's snapshot across the user's session: unauthenticated, loading,
//! loaded, or errored. Fetches are asynchronous and may overlap with a
//! sign-out or account switch, so every fetch carries a [`FetchTicket`]
//! keyed by the user it was issued for plus a sequence number; completing
//! a fetch with a stale or mismatched ticket is a no-op.
//!
//! The session itself performs no I/O. Callers run the fetch through the
//! `SubscriptionStore` port and feed the result back in.

use crate::domain::foundation::{Timestamp, UserId};

use super::{decide, Feature, SubscriptionSnapshot};

/// Ticket identifying one in-flight snapshot fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    user_id: UserId,
    seq: u64,
}

impl FetchTicket {
    /// The user this fetch was issued for.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// The session's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No user identity; treat as Basic with no trial.
    Unauthenticated,
    /// A fetch is in flight and no snapshot has been asserted yet.
    Loading,
    /// A snapshot is available (possibly stale until the next refetch).
    Loaded,
    /// The last fetch failed; any prior snapshot is retained.
    Error,
}

/// Three-way gate outcome for a consuming surface.
///
/// `Loading` is distinct from denial so surfaces never flash a locked
/// state while the snapshot or admin flag is still being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Snapshot or admin flag still unresolved.
    Loading,
    /// Access granted.
    Granted,
    /// Access denied, with the upgrade prompt to display.
    Denied { upgrade_message: String },
}

/// State machine owning one user session's snapshot.
#[derive(Debug)]
pub struct SubscriptionSession {
    user_id: Option<UserId>,
    snapshot: Option<SubscriptionSnapshot>,
    error: Option<String>,
    in_flight: Option<FetchTicket>,
    next_seq: u64,
}

impl SubscriptionSession {
    /// Creates a session with no authenticated user.
    pub fn new() -> Self {
        Self {
            user_id: None,
            snapshot: None,
            error: None,
            in_flight: None,
            next_seq: 0,
        }
    }

    /// Current phase of this session.
    pub fn phase(&self) -> SessionPhase {
        if self.user_id.is_none() {
            return SessionPhase::Unauthenticated;
        }
        if self.in_flight.is_some() && self.snapshot.is_none() {
            return SessionPhase::Loading;
        }
        if self.snapshot.is_some() {
            return SessionPhase::Loaded;
        }
        if self.error.is_some() {
            return SessionPhase::Error;
        }
        SessionPhase::Loading
    }

    /// The current snapshot, if one has been loaded.
    pub fn snapshot(&self) -> Option<&SubscriptionSnapshot> {
        self.snapshot.as_ref()
    }

    /// The last fetch error, if the session is in an error state.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies an identity change (sign-in, sign-out, account switch).
    ///
    /// All prior state is dropped, including any in-flight fetch - its
    /// eventual result will no longer match and will be discarded.
    /// Returns a ticket for the new user's initial fetch, or `None` on
    /// sign-out.
    pub fn identity_changed(&mut self, user_id: Option<UserId>) -> Option<FetchTicket> {
        self.snapshot = None;
        self.error = None;
        self.in_flight = None;
        self.user_id = user_id.clone();
        user_id.map(|id| self.begin_fetch_inner(id))
    }

    /// Starts a manual refetch for the current user.
    ///
    /// Returns `None` when unauthenticated. The prior snapshot stays
    /// visible while the refetch is in flight.
    pub fn begin_refetch(&mut self) -> Option<FetchTicket> {
        self.user_id.clone().map(|id| self.begin_fetch_inner(id))
    }

    fn begin_fetch_inner(&mut self, user_id: UserId) -> FetchTicket {
        let ticket = FetchTicket {
            user_id,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.in_flight = Some(ticket.clone());
        ticket
    }

    /// Applies a completed fetch.
    ///
    /// The result is discarded unless `ticket` is exactly the most
    /// recently issued ticket for the current user; anything else is a
    /// response to a fetch that was superseded or belongs to a previous
    /// identity. On success the snapshot is replaced wholesale; on
    /// failure the prior snapshot is retained and the error recorded.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<SubscriptionSnapshot, String>,
    ) {
        if self.in_flight.as_ref() != Some(&ticket) {
            return;
        }
        self.in_flight = None;

        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
    }

    /// Gate outcome for one feature.
    ///
    /// `is_admin` is `None` while the admin lookup is still in flight;
    /// the gate stays in `Loading` until both inputs are resolved, so a
    /// denial is never flashed prematurely. An errored session with no
    /// prior snapshot also reports `Loading` - an error must never read
    /// as a grant, and surfaces are expected to offer a retry.
    pub fn gate_state(&self, is_admin: Option<bool>, feature: Feature, now: Timestamp) -> GateState {
        let Some(is_admin) = is_admin else {
            return GateState::Loading;
        };

        let snapshot = match (self.phase(), self.snapshot) {
            // Unauthenticated callers are evaluated against the fail-safe
            // default rather than waiting on a fetch that will never run.
            (SessionPhase::Unauthenticated, _) => SubscriptionSnapshot::basic(),
            (_, Some(snapshot)) => snapshot,
            (_, None) => return GateState::Loading,
        };

        let decision = decide(&snapshot, is_admin, feature, now);
        if decision.granted {
            GateState::Granted
        } else {
            GateState::Denied {
                upgrade_message: decision
                    .upgrade_message
                    .unwrap_or_default()
                    .to_string(),
            }
        }
    }
}

impl Default for SubscriptionSession {
    fn default() -> Self {
        Self::new()
    }
}
