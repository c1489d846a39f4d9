use std::time::{Duration, Instant};

use serde::Serialize;

/// How long a success or error banner stays up.
pub const STATUS_RESET_AFTER: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    Idle,
    Success,
    Error,
}

/// Contact form submission state; a result reverts to idle on its own.
#[derive(Debug, Clone)]
pub struct SubmitState {
    status: SubmitStatus,
    set_at: Instant,
    submitting: bool,
}

impl SubmitState {
    pub fn new(now: Instant) -> Self {
        Self {
            status: SubmitStatus::Idle,
            set_at: now,
            submitting: false,
        }
    }

    /// Starts a submission; returns false if one is already in flight.
    pub fn begin(&mut self, now: Instant) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        self.status = SubmitStatus::Idle;
        self.set_at = now;
        true
    }

    pub fn finish(&mut self, succeeded: bool, now: Instant) {
        self.submitting = false;
        self.status = if succeeded {
            SubmitStatus::Success
        } else {
            SubmitStatus::Error
        };
        self.set_at = now;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn status(&self, now: Instant) -> SubmitStatus {
        if self.status != SubmitStatus::Idle
            && now.saturating_duration_since(self.set_at) >= STATUS_RESET_AFTER
        {
            SubmitStatus::Idle
        } else {
            self.status
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.status = SubmitStatus::Idle;
        self.set_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_resets_after_delay() {
        let t0 = Instant::now();
        let mut state = SubmitState::new(t0);
        assert!(state.begin(t0));
        state.finish(true, t0);
        assert_eq!(state.status(t0 + Duration::from_millis(4999)), SubmitStatus::Success);
        assert_eq!(state.status(t0 + STATUS_RESET_AFTER), SubmitStatus::Idle);
    }

    #[test]
    fn test_error_resets_after_delay() {
        let t0 = Instant::now();
        let mut state = SubmitState::new(t0);
        state.begin(t0);
        state.finish(false, t0);
        assert_eq!(state.status(t0), SubmitStatus::Error);
        assert_eq!(state.status(t0 + Duration::from_secs(6)), SubmitStatus::Idle);
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let t0 = Instant::now();
        let mut state = SubmitState::new(t0);
        assert!(state.begin(t0));
        assert!(!state.begin(t0));
        assert!(state.is_submitting());
        state.finish(true, t0);
        assert!(state.begin(t0));
    }

    #[test]
    fn test_manual_reset() {
        let t0 = Instant::now();
        let mut state = SubmitState::new(t0);
        state.finish(true, t0);
        state.reset(t0);
        assert_eq!(state.status(t0), SubmitStatus::Idle);
    }
}
