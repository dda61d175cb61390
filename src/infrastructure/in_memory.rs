use crate::domain::ports::{Mutation, ReceivableStore};
use crate::domain::receivable::{PartnerId, Receivable, ReceivableId};
use crate::error::{ReceivableError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Versioned {
    version: u64,
    receivable: Receivable,
}

/// A thread-safe in-memory receivable store.
///
/// Every document carries a version that is bumped on each write.
/// `try_update` runs the mutation without holding any lock and only commits
/// when the version it read is still current, which gives the same
/// optimistic-conflict behavior as a document database transaction.
#[derive(Default, Clone)]
pub struct InMemoryReceivableStore {
    receivables: Arc<RwLock<HashMap<ReceivableId, Versioned>>>,
}

impl InMemoryReceivableStore {
    /// Creates a new, empty in-memory receivable store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReceivableStore for InMemoryReceivableStore {
    async fn store(&self, receivable: Receivable) -> Result<()> {
        let mut receivables = self.receivables.write().await;
        let version = receivables
            .get(receivable.id())
            .map_or(0, |current| current.version + 1);
        receivables.insert(
            receivable.id().clone(),
            Versioned {
                version,
                receivable,
            },
        );
        Ok(())
    }

    async fn get(&self, id: &ReceivableId) -> Result<Option<Receivable>> {
        let receivables = self.receivables.read().await;
        Ok(receivables.get(id).map(|v| v.receivable.clone()))
    }

    async fn find_pending_by_partner(&self, partner_id: &PartnerId) -> Result<Vec<Receivable>> {
        let receivables = self.receivables.read().await;
        Ok(receivables
            .values()
            .map(|v| &v.receivable)
            .filter(|r| r.is_pending() && r.partner_id() == partner_id)
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<Receivable>> {
        let receivables = self.receivables.read().await;
        Ok(receivables.values().map(|v| v.receivable.clone()).collect())
    }

    async fn try_update(&self, id: &ReceivableId, mutation: Mutation<'_>) -> Result<Receivable> {
        let snapshot = self.receivables.read().await.get(id).cloned();
        let read_version = snapshot.as_ref().map(|v| v.version);

        let updated = mutation(snapshot.map(|v| v.receivable))?;
        if updated.id() != id {
            return Err(ReceivableError::internal(format!(
                "Mutation of {id} produced a document for {}",
                updated.id()
            )));
        }

        let mut receivables = self.receivables.write().await;
        let live_version = receivables.get(id).map(|v| v.version);
        if live_version != read_version {
            return Err(ReceivableError::Conflict);
        }

        receivables.insert(
            id.clone(),
            Versioned {
                version: read_version.map_or(0, |v| v + 1),
                receivable: updated.clone(),
            },
        );
        Ok(updated)
    }
}
