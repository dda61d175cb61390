use crate::domain::ports::{Mutation, ReceivableStore};
use crate::domain::receivable::{PartnerId, Receivable, ReceivableId};
use crate::error::{ReceivableError, Result};
use async_trait::async_trait;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, ErrorKind, IteratorMode, OptimisticTransactionDB,
    Options,
};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding receivable documents, keyed by receivable id.
pub const CF_RECEIVABLES: &str = "receivables";

/// A persistent receivable store backed by a RocksDB optimistic transaction DB.
///
/// Documents are stored as JSON and validated on every read. `try_update`
/// tracks the key with `get_for_update_cf` so a concurrent commit to the same
/// receivable makes our commit fail instead of overwriting it.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<OptimisticTransactionDB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_receivables = ColumnFamilyDescriptor::new(CF_RECEIVABLES, Options::default());
        let db = OptimisticTransactionDB::open_cf_descriptors(&opts, path, vec![cf_receivables])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_RECEIVABLES)
            .ok_or_else(|| ReceivableError::internal("Receivables column family not found"))
    }
}

fn encode(receivable: &Receivable) -> Result<Vec<u8>> {
    serde_json::to_vec(receivable)
        .map_err(|e| ReceivableError::internal(format!("Serialization error: {}", e)))
}

fn decode(bytes: &[u8]) -> Result<Receivable> {
    serde_json::from_slice(bytes)
        .map_err(|e| ReceivableError::internal(format!("Deserialization error: {}", e)))
}

#[async_trait]
impl ReceivableStore for RocksDBStore {
    async fn store(&self, receivable: Receivable) -> Result<()> {
        let cf = self.cf()?;
        self.db
            .put_cf(cf, receivable.id().as_str().as_bytes(), encode(&receivable)?)?;
        Ok(())
    }

    async fn get(&self, id: &ReceivableId) -> Result<Option<Receivable>> {
        let cf = self.cf()?;
        match self.db.get_cf(cf, id.as_str().as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn find_pending_by_partner(&self, partner_id: &PartnerId) -> Result<Vec<Receivable>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|r| r.is_pending() && r.partner_id() == partner_id)
            .collect())
    }

    async fn all(&self) -> Result<Vec<Receivable>> {
        let cf = self.cf()?;
        let mut receivables = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            receivables.push(decode(&value)?);
        }
        Ok(receivables)
    }

    async fn try_update(&self, id: &ReceivableId, mutation: Mutation<'_>) -> Result<Receivable> {
        let cf = self.cf()?;
        let key = id.as_str().as_bytes();
        let txn = self.db.transaction();

        let current = match txn.get_for_update_cf(cf, key, true)? {
            Some(bytes) => Some(decode(&bytes)?),
            None => None,
        };
        let updated = mutation(current)?;
        if updated.id() != id {
            return Err(ReceivableError::internal(format!(
                "Mutation of {id} produced a document for {}",
                updated.id()
            )));
        }

        txn.put_cf(cf, key, encode(&updated)?)?;
        match txn.commit() {
            Ok(()) => Ok(updated),
            Err(e) if matches!(e.kind(), ErrorKind::Busy | ErrorKind::TryAgain) => {
                Err(ReceivableError::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }
}
