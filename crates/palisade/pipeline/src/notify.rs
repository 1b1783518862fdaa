//! Terminal-state notifications.
//!
//! Emitted fire-and-forget after a deployment reaches `deployed` or
//! `failed`; delivery failure never affects the recorded outcome.

use async_trait::async_trait;
use tokio::sync::Mutex;

use palisade_types::{DeploymentId, DeploymentStatus, UserId};

/// One terminal-state notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub deployment_id: DeploymentId,
    pub status: DeploymentStatus,
    pub message: String,
}

impl Notification {
    pub fn deployed(deployment_id: DeploymentId, address: &str) -> Self {
        Self {
            deployment_id,
            status: DeploymentStatus::Deployed,
            message: format!("guard deployed at {address}"),
        }
    }

    pub fn failed(deployment_id: DeploymentId, reason: &str) -> Self {
        Self {
            deployment_id,
            status: DeploymentStatus::Failed,
            message: format!("deployment failed: {reason}"),
        }
    }
}

/// Notification delivery failed.
#[derive(Debug, thiserror::Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Delivery channel for terminal-state notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user: &UserId, notification: Notification) -> Result<(), NotifyError>;
}

/// Notifier that drops everything. Default for embedded use.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _user: &UserId, _notification: Notification) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Notifier that records everything it is asked to deliver.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(UserId, Notification)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    pub async fn sent(&self) -> Vec<(UserId, Notification)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, user: &UserId, notification: Notification) -> Result<(), NotifyError> {
        self.sent.lock().await.push((user.clone(), notification));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_notifier_captures_deliveries() {
        let notifier = RecordingNotifier::new();
        let id = DeploymentId::generate();
        notifier
            .notify(
                &UserId::new("u1"),
                Notification::deployed(id.clone(), "0xabc"),
            )
            .await
            .unwrap();

        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.deployment_id, id);
        assert_eq!(sent[0].1.status, DeploymentStatus::Deployed);
    }
}
