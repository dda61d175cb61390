//! Storage adapters implementing [`ReceivableStore`](crate::domain::ports::ReceivableStore).

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
