use std::time::Duration;

use log::warn;

use crate::error::RevivalError;

/// Single in-flight revival countdown, advanced with unscaled time
#[derive(Debug, Default)]
pub struct RevivalSequencer {
    remaining: Option<Duration>,
}

impl RevivalSequencer {
    pub fn new() -> Self {
        Self { remaining: None }
    }

    /// Start the countdown. A second trigger while one is pending is refused.
    pub fn trigger(&mut self, delay: Duration) -> Result<(), RevivalError> {
        if self.remaining.is_some() {
            warn!("revival already pending, trigger rejected");
            return Err(RevivalError::AlreadyPending);
        }
        self.remaining = Some(delay);
        Ok(())
    }

    /// Returns true on the call that finishes the countdown
    pub fn advance(&mut self, unscaled: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let left = remaining.saturating_sub(unscaled);
        if left.is_zero() {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(left);
            false
        }
    }

    /// Drop a pending revival; false if none was running
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }
}
