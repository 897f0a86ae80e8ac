//! Submission lifecycle shared between a store slice and its screens.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StatusError {
    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        action: &'static str,
        from: &'static str,
    },
}

/// Idle -> Pending -> Succeeded | Failed -> Idle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl SubmissionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Succeeded(_) => "succeeded",
            SubmissionStatus::Failed(_) => "failed",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Succeeded(_) | SubmissionStatus::Failed(_)
        )
    }

    fn invalid(&self, action: &'static str) -> StatusError {
        StatusError::InvalidTransition {
            action,
            from: self.name(),
        }
    }

    /// Idle -> Pending
    pub fn begin(&mut self) -> Result<(), StatusError> {
        if *self != SubmissionStatus::Idle {
            return Err(self.invalid("submit"));
        }
        *self = SubmissionStatus::Pending;
        Ok(())
    }

    /// Pending -> Succeeded(message) | Failed(error)
    pub fn resolve(&mut self, outcome: Result<String, String>) -> Result<(), StatusError> {
        if !self.is_pending() {
            return Err(self.invalid("resolve"));
        }
        *self = match outcome {
            Ok(message) => SubmissionStatus::Succeeded(message),
            Err(error) => SubmissionStatus::Failed(error),
        };
        Ok(())
    }

    /// Succeeded | Failed -> Idle
    pub fn acknowledge(&mut self) -> Result<(), StatusError> {
        if !self.is_terminal() {
            return Err(self.invalid("acknowledge"));
        }
        *self = SubmissionStatus::Idle;
        Ok(())
    }
}
