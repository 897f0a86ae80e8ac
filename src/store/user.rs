//! Current user profile and profile submissions

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::api::{ApiError, PortfolioApi, User};
use crate::form::{Payload, StatusError, SubmissionStatus};
use crate::store::{EntityStore, StoreEvent};
use crate::task::{poll_task, PollResult};

/// User-related state
pub struct UserSlice {
    api: Arc<dyn PortfolioApi>,
    /// The signed-in portfolio owner, once loaded
    pub user: Option<User>,
    /// Error message from the last profile load
    pub load_error: Option<String>,
    status: SubmissionStatus,
    submit_task: Option<JoinHandle<Result<String, ApiError>>>,
    load_task: Option<JoinHandle<Result<User, ApiError>>>,
}

impl UserSlice {
    pub fn new(api: Arc<dyn PortfolioApi>) -> Self {
        Self {
            api,
            user: None,
            load_error: None,
            status: SubmissionStatus::Idle,
            submit_task: None,
            load_task: None,
        }
    }

    pub fn loading(&self) -> bool {
        self.load_task.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.submit_task.is_some() || self.load_task.is_some()
    }

    /// Poll the async tasks for completion
    pub fn poll(&mut self) -> Vec<StoreEvent> {
        let mut events = Vec::new();

        match poll_task(&mut self.load_task) {
            PollResult::Complete(Ok(Ok(user))) => {
                events.push(StoreEvent::LogInfo("Loaded user profile".to_string()));
                self.user = Some(user);
                self.load_error = None;
            }
            PollResult::Complete(Ok(Err(e))) => {
                let msg = e.to_string();
                events.push(StoreEvent::LogError(format!("Failed to load profile: {}", msg)));
                self.load_error = Some(msg);
            }
            PollResult::Complete(Err(e)) => {
                let msg = e.to_string();
                events.push(StoreEvent::LogError(format!("Profile task panicked: {}", msg)));
                self.load_error = Some(msg);
            }
            PollResult::Pending | PollResult::NoTask => {}
        }

        let outcome = match poll_task(&mut self.submit_task) {
            PollResult::Complete(Ok(Ok(message))) => Some(Ok(message)),
            PollResult::Complete(Ok(Err(e))) => Some(Err(e.to_string())),
            PollResult::Complete(Err(e)) => Some(Err(format!("Profile update task panicked: {}", e))),
            PollResult::Pending | PollResult::NoTask => None,
        };
        if let Some(outcome) = outcome {
            if let Err(error) = &outcome {
                events.push(StoreEvent::LogError(format!("Profile update failed: {}", error)));
            } else {
                events.push(StoreEvent::LogInfo("Profile updated".to_string()));
            }
            if let Err(e) = self.status.resolve(outcome) {
                events.push(StoreEvent::LogError(e.to_string()));
            }
        }

        events
    }
}

impl EntityStore for UserSlice {
    fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// The profile has no id; the backend updates the signed-in user.
    fn dispatch_submit(&mut self, _id: Option<&str>, payload: Payload) -> Result<(), StatusError> {
        self.status.begin()?;
        tracing::info!("Updating profile");

        let api = self.api.clone();
        self.submit_task = Some(tokio::spawn(async move { api.update_profile(payload).await }));
        Ok(())
    }

    fn acknowledge(&mut self) -> Result<(), StatusError> {
        self.status.acknowledge()
    }

    /// Reload the current user
    fn refresh(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        let api = self.api.clone();
        self.load_task = Some(tokio::spawn(async move { api.get_user().await }));
    }
}
