//! Request-scoped call context.
//!
//! A [`CallContext`] is created once per inbound request. It carries the
//! deadline inherited from the server timeout and, after authentication, the
//! raw caller id handed out by the identity service. Trace correlation lives
//! on the active `tracing` span (see [`crate::telemetry`]).

use std::time::{Duration, Instant};

use crate::UserId;

/// Deadline and caller handed to controllers and outbound adapters.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    caller: Option<String>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with no deadline and no caller, for background work and tests.
    pub fn background() -> Self {
        Self::new()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Records the id the identity service resolved for the bearer token.
    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` when no deadline is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// The raw caller id as returned by the identity service.
    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }

    /// The authenticated caller, if one was resolved and is a valid UUID.
    pub fn user_id(&self) -> Option<UserId> {
        self.caller.as_deref().and_then(|raw| UserId::parse(raw).ok())
    }
}
