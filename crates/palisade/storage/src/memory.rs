//! In-memory reference implementation of [`DeploymentStore`].

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use palisade_types::{Deployment, DeploymentId, UserId};

use crate::error::{StorageError, StorageResult};
use crate::traits::{DeploymentPatch, DeploymentStore};

/// In-memory deployment store.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<DeploymentId, Deployment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DeploymentStore for MemoryStore {
    async fn create(&self, deployment: &Deployment) -> StorageResult<()> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StorageError::backend("records lock poisoned"))?;

        if guard.contains_key(&deployment.id) {
            return Err(StorageError::Conflict(deployment.id.to_string()));
        }

        guard.insert(deployment.id.clone(), deployment.clone());
        Ok(())
    }

    async fn update(&self, id: &DeploymentId, patch: DeploymentPatch) -> StorageResult<()> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StorageError::backend("records lock poisoned"))?;

        let record = guard
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        patch.apply_to(record);
        Ok(())
    }

    async fn get(&self, id: &DeploymentId) -> StorageResult<Option<Deployment>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StorageError::backend("records lock poisoned"))?;
        Ok(guard.get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> StorageResult<Vec<Deployment>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StorageError::backend("records lock poisoned"))?;

        let mut records: Vec<Deployment> = guard
            .values()
            .filter(|d| &d.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
