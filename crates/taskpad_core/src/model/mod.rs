//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record and its text policy.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Task text is trimmed and non-empty whenever a task exists.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod task;
