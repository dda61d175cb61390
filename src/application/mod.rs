//! Application layer orchestrating receivable collection.
//!
//! `CollectionWorkflow` is the entry point the surrounding application calls:
//! it validates collection requests, drives the store's optimistic
//! transactions with retry, and serves the pending-receivable listing.

pub mod workflow;
