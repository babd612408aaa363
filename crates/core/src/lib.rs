//! Core engine for the schoolsync project.
//!
//! Projects school-domain entities (users, classes, subjects, enrollments)
//! into a denormalized single-table layout and reconciles a key-value table
//! against a fixed seed set with a destructive wipe-then-reload pass.
//!
//! The storage backend is abstracted behind [`storage::TableStore`]; this
//! crate has no AWS dependency and is fully testable against the in-memory
//! backend.

pub mod projection;
pub mod reconcile;
pub mod school;
pub mod storage;
