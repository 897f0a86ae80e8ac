//! Status reflector: turns a terminal submission status into UI reactions.

use super::status::SubmissionStatus;
use crate::notify::{ToastKind, Toasts};
use crate::store::EntityStore;

/// Something the screen must do in response to the observed status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    Notify(ToastKind, String),
    /// Return the status to Idle so the same outcome is not shown twice
    Acknowledge,
    /// Re-fetch the collection so other views see the change
    Refresh,
}

/// Reactions for the current status, in the order they must be applied.
pub fn reactions(status: &SubmissionStatus) -> Vec<Reaction> {
    match status {
        SubmissionStatus::Failed(error) => vec![
            Reaction::Notify(ToastKind::Error, error.clone()),
            Reaction::Acknowledge,
        ],
        SubmissionStatus::Succeeded(message) => vec![
            Reaction::Notify(ToastKind::Success, message.clone()),
            Reaction::Acknowledge,
            Reaction::Refresh,
        ],
        SubmissionStatus::Idle | SubmissionStatus::Pending => Vec::new(),
    }
}

/// Observe a slice's status and apply the reactions to it.
pub fn reflect(store: &mut dyn EntityStore, toasts: &mut Toasts) {
    for reaction in reactions(store.status()) {
        match reaction {
            Reaction::Notify(ToastKind::Success, message) => toasts.success(message),
            Reaction::Notify(ToastKind::Error, message) => toasts.error(message),
            Reaction::Acknowledge => {
                if let Err(e) = store.acknowledge() {
                    tracing::warn!("{}", e);
                }
            }
            Reaction::Refresh => store.refresh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Payload, StatusError};

    #[derive(Default)]
    struct FakeStore {
        status: SubmissionStatus,
        refreshes: usize,
    }

    impl EntityStore for FakeStore {
        fn status(&self) -> &SubmissionStatus {
            &self.status
        }

        fn dispatch_submit(&mut self, _id: Option<&str>, _payload: Payload) -> Result<(), StatusError> {
            self.status.begin()
        }

        fn acknowledge(&mut self) -> Result<(), StatusError> {
            self.status.acknowledge()
        }

        fn refresh(&mut self) {
            self.refreshes += 1;
        }
    }

    #[test]
    fn test_quiet_states() {
        assert!(reactions(&SubmissionStatus::Idle).is_empty());
        assert!(reactions(&SubmissionStatus::Pending).is_empty());
    }

    #[test]
    fn test_failure_reactions() {
        let r = reactions(&SubmissionStatus::Failed("Bad request".into()));
        assert_eq!(
            r,
            vec![
                Reaction::Notify(ToastKind::Error, "Bad request".into()),
                Reaction::Acknowledge
            ]
        );
    }

    #[test]
    fn test_success_shown_once() {
        let mut store = FakeStore {
            status: SubmissionStatus::Succeeded("Project Updated".into()),
            ..Default::default()
        };
        let mut toasts = Toasts::default();

        reflect(&mut store, &mut toasts);
        reflect(&mut store, &mut toasts);

        assert_eq!(toasts.count(ToastKind::Success, "Project Updated"), 1);
        assert_eq!(store.refreshes, 1);
        assert_eq!(store.status, SubmissionStatus::Idle);
    }

    #[test]
    fn test_failure_cleared_without_refresh() {
        let mut store = FakeStore {
            status: SubmissionStatus::Failed("Nope".into()),
            ..Default::default()
        };
        let mut toasts = Toasts::default();

        reflect(&mut store, &mut toasts);

        assert_eq!(toasts.count(ToastKind::Error, "Nope"), 1);
        assert_eq!(store.refreshes, 0);
        assert_eq!(store.status, SubmissionStatus::Idle);
    }
}
