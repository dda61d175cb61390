//! Receivable records, collection requests, and the storage port they are
//! persisted through.

pub mod collection;
pub mod ports;
pub mod receivable;
