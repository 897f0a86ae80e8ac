//! Shared client-side store.
//!
//! The store is an explicit context owned by the app and lent to screens.
//! Each slice owns its submission status and collection; `poll` applies task
//! completions one at a time on the UI thread.

mod project;
mod user;

use std::sync::Arc;

pub use project::ProjectSlice;
pub use user::UserSlice;

use crate::api::PortfolioApi;
use crate::form::{Payload, StatusError, SubmissionStatus};

/// Events that slice poll methods can return.
/// These communicate results back to the app without direct mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}

/// What the edit-form pipeline needs from a slice.
pub trait EntityStore {
    fn status(&self) -> &SubmissionStatus;

    /// Move Idle -> Pending and start the create/update call.
    fn dispatch_submit(&mut self, id: Option<&str>, payload: Payload) -> Result<(), StatusError>;

    /// Move a terminal status back to Idle.
    fn acknowledge(&mut self) -> Result<(), StatusError>;

    /// Re-fetch the slice's collection.
    fn refresh(&mut self);
}

/// All slices, injected into screens
pub struct AppStore {
    pub projects: ProjectSlice,
    pub user: UserSlice,
}

impl AppStore {
    pub fn new(api: Arc<dyn PortfolioApi>) -> Self {
        Self {
            projects: ProjectSlice::new(api.clone()),
            user: UserSlice::new(api),
        }
    }

    /// Poll every slice for finished work
    pub fn poll(&mut self) -> Vec<StoreEvent> {
        let mut events = self.projects.poll();
        events.extend(self.user.poll());
        events
    }

    pub fn is_busy(&self) -> bool {
        self.projects.is_busy() || self.user.is_busy()
    }
}

/// Give spawned tasks time to finish, running `step` between waits.
#[cfg(test)]
pub(crate) async fn settle(mut step: impl FnMut()) {
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        step();
    }
}
