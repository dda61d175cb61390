use super::receivable::{PartnerId, Receivable, ReceivableId};
use crate::error::Result;
use async_trait::async_trait;

/// Read-check-write step run inside a store transaction.
///
/// Receives the freshly read document (or `None` when it does not exist) and
/// returns the document to commit. A store may call it again on a later
/// attempt, so it must not carry state between calls.
pub type Mutation<'a> = &'a (dyn Fn(Option<Receivable>) -> Result<Receivable> + Send + Sync);

#[async_trait]
pub trait ReceivableStore: Send + Sync {
    /// Unconditional single-document write.
    async fn store(&self, receivable: Receivable) -> Result<()>;
    async fn get(&self, id: &ReceivableId) -> Result<Option<Receivable>>;
    async fn find_pending_by_partner(&self, partner_id: &PartnerId) -> Result<Vec<Receivable>>;
    async fn all(&self) -> Result<Vec<Receivable>>;

    /// One optimistic read-modify-write attempt.
    ///
    /// Returns [`ReceivableError::Conflict`](crate::error::ReceivableError::Conflict)
    /// when the document changed between the read and the commit; nothing is
    /// written in that case, nor when `mutation` fails.
    async fn try_update(&self, id: &ReceivableId, mutation: Mutation<'_>) -> Result<Receivable>;
}

pub type ReceivableStoreBox = Box<dyn ReceivableStore>;
pub type ReceivableStoreFactory = Box<dyn Fn() -> ReceivableStoreBox + Send + Sync>;
