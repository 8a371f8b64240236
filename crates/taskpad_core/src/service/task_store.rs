//! Task store manager.
//!
//! # Responsibility
//! - Own the canonical in-memory task list.
//! - Mediate every mutation and keep the durable copy in sync.
//!
//! # Invariants
//! - Task ids are unique across the store at all times.
//! - Stored order is insertion order; edit and toggle never reorder.
//! - Every successful mutation has already replaced the whole persisted
//!   collection before it returns.
//! - A failed durable write leaves the in-memory state untouched, so memory
//!   never runs ahead of storage.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::task::{normalize_text, Task, TaskId};
use crate::storage::kv::{KvError, KvStore};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the whole serialized task collection lives.
pub const TASKS_KEY: &str = "tasks";

pub type StoreResult<T> = Result<T, StoreError>;

/// Task store failure taxonomy.
#[derive(Debug)]
pub enum StoreError {
    /// Durable read failed before task state could be derived.
    Read(KvError),
    /// Durable write failed after a mutation was computed; the mutation was
    /// not committed to memory.
    Write(KvError),
    /// The blob failed to decode or encode as a task collection.
    Codec(serde_json::Error),
    /// The decoded blob violates a store invariant.
    Invalid(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "task collection read failed: {err}"),
            Self::Write(err) => write!(f, "task collection write failed: {err}"),
            Self::Codec(err) => write!(f, "task collection serialization failed: {err}"),
            Self::Invalid(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Single source of truth for the task collection.
///
/// Callers observe the collection only through these operations; the UI layer
/// holds a read-only projection refreshed after each call. Mutations take
/// `&mut self`, so interleaved read-modify-write against one store instance
/// is ruled out at compile time.
pub struct TaskStore<K: KvStore> {
    kv: K,
    tasks: Vec<Task>,
}

impl<K: KvStore> TaskStore<K> {
    /// Reads the persisted collection without recovery.
    ///
    /// An absent key is an empty collection. Transport failures, undecodable
    /// blobs and invariant-violating blobs are surfaced as errors.
    pub fn load(kv: &K) -> StoreResult<Vec<Task>> {
        let Some(blob) = kv.get(TASKS_KEY).map_err(StoreError::Read)? else {
            return Ok(Vec::new());
        };
        decode_tasks(&blob)
    }

    /// Opens the store, degrading to an empty collection on any read failure.
    ///
    /// Malformed persisted data is non-fatal for the app: the failure is
    /// logged and the user starts from "no tasks shown" rather than a crash.
    pub fn open(kv: K) -> Self {
        let tasks = match Self::load(&kv) {
            Ok(tasks) => {
                info!(
                    "event=store_open module=task_store status=ok count={}",
                    tasks.len()
                );
                tasks
            }
            Err(err) => {
                warn!("event=store_open module=task_store status=recovered fallback=empty error={err}");
                Vec::new()
            }
        };
        Self { kv, tasks }
    }

    /// Read-only projection of the current collection, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Appends a new open task from raw user input.
    ///
    /// Blank input (after trimming) is declined silently: no task, no write,
    /// no state change. Returns the created task otherwise.
    pub fn add(&mut self, raw_text: &str) -> StoreResult<Option<Task>> {
        let Some(text) = normalize_text(raw_text) else {
            debug!("event=task_add module=task_store status=declined reason=blank_text");
            return Ok(None);
        };

        let task = Task::new(text);
        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next)?;

        info!(
            "event=task_add module=task_store status=ok task_id={} count={}",
            task.id,
            self.tasks.len()
        );
        Ok(Some(task))
    }

    /// Replaces the text of the task with `id`, leaving completion state and
    /// position untouched.
    ///
    /// Returns `false` without writing when `id` is unknown or the new text
    /// is blank after trimming.
    pub fn update(&mut self, id: TaskId, new_text: &str) -> StoreResult<bool> {
        let Some(text) = normalize_text(new_text) else {
            debug!("event=task_update module=task_store status=declined reason=blank_text task_id={id}");
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        let Some(task) = next.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_update module=task_store status=declined reason=not_found task_id={id}");
            return Ok(false);
        };
        task.text = text;
        self.commit(next)?;

        info!("event=task_update module=task_store status=ok task_id={id}");
        Ok(true)
    }

    /// Flips the completion flag of the task with `id`.
    ///
    /// Returns the updated task, or `None` without writing when `id` is
    /// unknown. Toggling twice restores the original state.
    pub fn toggle_complete(&mut self, id: TaskId) -> StoreResult<Option<Task>> {
        let mut next = self.tasks.clone();
        let Some(task) = next.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=task_store status=declined reason=not_found task_id={id}");
            return Ok(None);
        };
        task.is_completed = !task.is_completed;
        let updated = task.clone();
        self.commit(next)?;

        info!(
            "event=task_toggle module=task_store status=ok task_id={id} is_completed={}",
            updated.is_completed
        );
        Ok(Some(updated))
    }

    /// Removes the task with `id` if present, preserving the relative order
    /// of the remaining tasks.
    ///
    /// Returns whether a removal occurred; an unknown id performs no write.
    /// Confirmation prompts are the caller's policy, never applied here.
    pub fn remove(&mut self, id: TaskId) -> StoreResult<bool> {
        let mut next = self.tasks.clone();
        let before = next.len();
        next.retain(|task| task.id != id);
        if next.len() == before {
            debug!("event=task_remove module=task_store status=declined reason=not_found task_id={id}");
            return Ok(false);
        }
        self.commit(next)?;

        info!(
            "event=task_remove module=task_store status=ok task_id={id} count={}",
            self.tasks.len()
        );
        Ok(true)
    }

    /// Case-insensitive substring filter over task text.
    ///
    /// Pure read: no persistence, no mutation of stored state. An empty query
    /// returns the full collection unchanged in order.
    pub fn filter(&self, query: &str) -> Vec<Task> {
        if query.is_empty() {
            return self.tasks.clone();
        }
        let needle = query.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.text.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Persists the prospective collection, then commits it to memory.
    ///
    /// Ordering matters: the whole-collection replace write happens first,
    /// and only a successful write swaps the in-memory state.
    fn commit(&mut self, next: Vec<Task>) -> StoreResult<()> {
        let blob = serde_json::to_string(&next)?;
        self.kv.set(TASKS_KEY, &blob).map_err(|err| {
            warn!("event=store_persist module=task_store status=error error={err}");
            StoreError::Write(err)
        })?;
        self.tasks = next;
        Ok(())
    }
}

fn decode_tasks(blob: &str) -> StoreResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(blob)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(StoreError::Invalid(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        if task.text.trim().is_empty() {
            return Err(StoreError::Invalid(format!(
                "blank text on task {}",
                task.id
            )));
        }
    }

    Ok(tasks)
}
