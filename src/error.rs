use crate::domain::receivable::ReceivableId;
use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReceivableError>;

#[derive(Error, Debug)]
pub enum ReceivableError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Receivable {0} not found")]
    NotFound(ReceivableId),
    #[error("This payment is not pending")]
    InvalidState,
    #[error("Collected amount cannot be greater than the pending amount")]
    InvalidAmount { requested: Decimal, pending: Decimal },
    #[error("Receivable was modified concurrently")]
    Conflict,
    #[error("Transaction conflicted on every attempt ({0} retries)")]
    RetriesExhausted(u32),
    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    Storage(#[from] rocksdb::Error),
}

impl ReceivableError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::InternalError(message.into())
    }

    /// Failures caused by the backing store rather than by the request.
    pub fn is_backing_store(&self) -> bool {
        match self {
            Self::RetriesExhausted(_)
            | Self::Conflict
            | Self::InternalError(_)
            | Self::IoError(_) => true,
            #[cfg(feature = "storage-rocksdb")]
            Self::Storage(_) => true,
            _ => false,
        }
    }
}
