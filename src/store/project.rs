//! Project collection and project submissions

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::api::{ApiError, PortfolioApi, Project};
use crate::form::{Payload, StatusError, SubmissionStatus};
use crate::store::{EntityStore, StoreEvent};
use crate::task::{poll_task, PollResult};

/// Project-related state
pub struct ProjectSlice {
    api: Arc<dyn PortfolioApi>,
    /// Last fetched project list
    pub projects: Vec<Project>,
    /// Error message from the last list fetch
    pub list_error: Option<String>,
    status: SubmissionStatus,
    /// Async task for add/update
    submit_task: Option<JoinHandle<Result<String, ApiError>>>,
    /// Async task for fetching the list
    list_task: Option<JoinHandle<Result<Vec<Project>, ApiError>>>,
}

impl ProjectSlice {
    pub fn new(api: Arc<dyn PortfolioApi>) -> Self {
        Self {
            api,
            projects: Vec::new(),
            list_error: None,
            status: SubmissionStatus::Idle,
            submit_task: None,
            list_task: None,
        }
    }

    pub fn list_loading(&self) -> bool {
        self.list_task.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.submit_task.is_some() || self.list_task.is_some()
    }

    /// Poll the async tasks for completion
    pub fn poll(&mut self) -> Vec<StoreEvent> {
        let mut events = Vec::new();

        match poll_task(&mut self.list_task) {
            PollResult::Complete(Ok(Ok(projects))) => {
                events.push(StoreEvent::LogInfo(format!(
                    "Loaded {} projects",
                    projects.len()
                )));
                self.projects = projects;
                self.list_error = None;
            }
            PollResult::Complete(Ok(Err(e))) => {
                let msg = e.to_string();
                events.push(StoreEvent::LogError(format!(
                    "Failed to fetch projects: {}",
                    msg
                )));
                self.list_error = Some(msg);
            }
            PollResult::Complete(Err(e)) => {
                let msg = e.to_string();
                events.push(StoreEvent::LogError(format!("Project list task panicked: {}", msg)));
                self.list_error = Some(msg);
            }
            PollResult::Pending | PollResult::NoTask => {}
        }

        let outcome = match poll_task(&mut self.submit_task) {
            PollResult::Complete(Ok(Ok(message))) => Some(Ok(message)),
            PollResult::Complete(Ok(Err(e))) => Some(Err(e.to_string())),
            PollResult::Complete(Err(e)) => Some(Err(format!("Submission task panicked: {}", e))),
            PollResult::Pending | PollResult::NoTask => None,
        };
        if let Some(outcome) = outcome {
            match &outcome {
                Ok(message) => events.push(StoreEvent::LogInfo(format!(
                    "Project saved: {}",
                    message
                ))),
                Err(error) => events.push(StoreEvent::LogError(format!(
                    "Project submission failed: {}",
                    error
                ))),
            }
            if let Err(e) = self.status.resolve(outcome) {
                events.push(StoreEvent::LogError(e.to_string()));
            }
        }

        events
    }
}

impl EntityStore for ProjectSlice {
    fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    fn dispatch_submit(&mut self, id: Option<&str>, payload: Payload) -> Result<(), StatusError> {
        self.status.begin()?;

        let api = self.api.clone();
        let id = id.map(str::to_string);
        match &id {
            Some(id) => tracing::info!("Updating project {}", id),
            None => tracing::info!("Adding new project"),
        }

        self.submit_task = Some(tokio::spawn(async move {
            match id {
                Some(id) => api.update_project(&id, payload).await,
                None => api.add_project(payload).await,
            }
        }));
        Ok(())
    }

    fn acknowledge(&mut self) -> Result<(), StatusError> {
        self.status.acknowledge()
    }

    /// Start fetching the project list, replacing any fetch in flight
    fn refresh(&mut self) {
        if let Some(task) = self.list_task.take() {
            tracing::debug!("Restarting project list fetch");
            task.abort();
        }
        let api = self.api.clone();
        self.list_task = Some(tokio::spawn(async move { api.list_projects().await }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{ApiCall, RecordingApi};
    use crate::form::{FormRecord, ADD_PROJECT};
    use crate::store::settle;

    #[tokio::test]
    async fn test_add_resolves_success() {
        let api = Arc::new(RecordingApi::default());
        *api.submit_result.lock().unwrap() = Ok("New Project Added".to_string());
        let mut slice = ProjectSlice::new(api.clone());

        let payload = Payload::from_record(&FormRecord::new(&ADD_PROJECT));
        slice.dispatch_submit(None, payload).unwrap();
        assert!(slice.status().is_pending());

        settle(|| {
            slice.poll();
        })
        .await;

        assert_eq!(
            slice.status(),
            &SubmissionStatus::Succeeded("New Project Added".to_string())
        );
        assert_eq!(api.count(|c| matches!(c, ApiCall::AddProject(_))), 1);
    }

    #[tokio::test]
    async fn test_update_resolves_failure() {
        let api = Arc::new(RecordingApi::default());
        *api.submit_result.lock().unwrap() = Err("Invalid stack".to_string());
        let mut slice = ProjectSlice::new(api.clone());

        let payload = Payload::from_record(&FormRecord::new(&ADD_PROJECT));
        slice.dispatch_submit(Some("42"), payload).unwrap();
        settle(|| {
            slice.poll();
        })
        .await;

        assert_eq!(
            slice.status(),
            &SubmissionStatus::Failed("Invalid stack".to_string())
        );
        assert!(matches!(&api.calls()[0], ApiCall::UpdateProject(id, _) if id == "42"));
    }

    #[tokio::test]
    async fn test_second_dispatch_rejected_while_pending() {
        let api = Arc::new(RecordingApi {
            hold_submissions: true,
            ..Default::default()
        });
        let mut slice = ProjectSlice::new(api.clone());

        let payload = Payload::from_record(&FormRecord::new(&ADD_PROJECT));
        slice.dispatch_submit(None, payload.clone()).unwrap();
        assert!(slice.dispatch_submit(None, payload).is_err());
    }

    #[tokio::test]
    async fn test_refresh_loads_list() {
        let api = Arc::new(RecordingApi::default());
        api.projects.lock().unwrap().push(Project {
            id: "1".into(),
            title: Some("Portfolio".into()),
            ..Default::default()
        });
        let mut slice = ProjectSlice::new(api.clone());

        slice.refresh();
        assert!(slice.list_loading());
        settle(|| {
            slice.poll();
        })
        .await;

        assert!(!slice.list_loading());
        assert_eq!(slice.projects.len(), 1);
        assert!(slice.list_error.is_none());
    }
}
