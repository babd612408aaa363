//! Storage backend implementations.
//!
//! Concrete implementations of the `TableStore` contract defined in
//! `schoolsync_core::storage`. DynamoDB is the only production backend;
//! the in-memory backend used by tests lives in the core crate alongside
//! the contract.

pub mod dynamodb;
