//! Request-token gating for catalogue refreshes.

use crate::model::CatalogueScope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing id of a catalogue request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A catalogue request the host should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    pub token: RequestToken,
    pub scope: CatalogueScope,
}

/// What became of a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The catalogue was installed
    Applied,
    /// A newer request was issued meanwhile; the result was dropped
    Stale,
    /// The fetch failed; the previous catalogue stays in place
    Failed,
}

/// Issues tokens and decides which completions still count.
#[derive(Debug, Clone, Default)]
pub struct CatalogueRefresher {
    issued: u64,
    latest: Option<RequestToken>,
    pending: Option<RefreshTicket>,
}

impl CatalogueRefresher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a request for `scope`, superseding every earlier one.
    pub fn issue(&mut self, scope: CatalogueScope) -> RefreshTicket {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.latest = Some(token);
        let ticket = RefreshTicket { token, scope };
        self.pending = Some(ticket.clone());
        tracing::debug!("Issued catalogue request {} for '{}'", token, ticket.scope.key());
        ticket
    }

    /// Take the newest request the host has not picked up yet.
    pub fn take_pending(&mut self) -> Option<RefreshTicket> {
        self.pending.take()
    }

    /// Whether `token` is the most recently issued one and still unsettled.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest == Some(token)
    }

    /// Settle a completed request. Returns `false` for stale tokens.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            tracing::trace!("Dropping stale catalogue response {}", token);
            return false;
        }
        self.latest = None;
        if self.pending.as_ref().is_some_and(|p| p.token == token) {
            self.pending = None;
        }
        true
    }

    /// Token of the request still in flight, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<RequestToken> {
        self.latest
    }
}
