//! Core domain logic for Taskpad.
//!
//! Single source of truth for the on-device task list: the durable key-value
//! facility, the task store manager that keeps memory and storage in sync,
//! and the session credential store.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{normalize_text, Task, TaskId};
pub use service::session::{SessionStore, CREDENTIAL_KEY};
pub use service::task_store::{StoreError, StoreResult, TaskStore, TASKS_KEY};
pub use storage::kv::{KvError, KvResult, KvStore, SqliteKvStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
