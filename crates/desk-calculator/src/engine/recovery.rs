//! Cancellable auto-recovery from the error display

use std::time::Duration;

use crate::core::CalcError;

/// A scheduled recovery waiting for its deadline
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRecovery {
    /// Clock time at which the display resets
    pub deadline: Duration,
    /// The failure that put the engine into the error state
    pub cause: CalcError,
}

/// Single-slot scheduler for the error-state reset
///
/// At most one recovery is pending; scheduling again replaces it.
#[derive(Debug, Clone)]
pub struct ErrorRecovery {
    delay: Duration,
    pending: Option<PendingRecovery>,
}

impl ErrorRecovery {
    /// Creates a scheduler that fires `delay` after each error
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Configured delay between error and recovery
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a recovery `delay` after `now`
    pub fn schedule(&mut self, now: Duration, cause: CalcError) {
        self.pending = Some(PendingRecovery {
            deadline: now.saturating_add(self.delay),
            cause,
        });
    }

    /// Drops the pending recovery, returning its cause
    pub fn cancel(&mut self) -> Option<CalcError> {
        self.pending.take().map(|p| p.cause)
    }

    /// Returns true while a recovery is scheduled
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending recovery, if any
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingRecovery> {
        self.pending.as_ref()
    }

    /// Time left until the deadline (zero once it has passed)
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.deadline.saturating_sub(now))
    }

    /// Consumes the pending recovery if its deadline has been reached
    pub fn take_due(&mut self, now: Duration) -> Option<CalcError> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.cancel(),
            _ => None,
        }
    }
}
