//! FFI use-case API for the mobile UI.
//!
//! # Responsibility
//! - Expose stable, use-case-level task and session functions to Dart.
//! - Keep error semantics simple: envelopes with `ok` + message, no throws.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Delete confirmation is UI policy; `task_delete` removes unconditionally.
//! - Messages are display-ready strings the shell shows in its snackbar.

use log::info;
use std::path::PathBuf;
use std::sync::OnceLock;

use taskpad_core::db::open_db;
use taskpad_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, normalize_text,
    ping as ping_inner, SessionStore, SqliteKvStore, Task, TaskId, TaskStore,
};
use uuid::Uuid;

const DB_FILE_NAME: &str = "taskpad.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for bridge smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for the same `level + log_dir`; conflicts return an error.
/// - Never panics; returns empty string on success, error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One task row as rendered by the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task ID in string form.
    pub id: String,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub is_completed: bool,
}

/// List envelope for load and search flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Tasks in stored order (possibly filtered).
    pub items: Vec<TaskItem>,
    /// Display-ready summary, e.g. "Showing 3 tasks.".
    pub message: String,
}

/// Action envelope for add/update/delete flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation changed the store.
    pub ok: bool,
    /// Affected task ID on success.
    pub task_id: Option<String>,
    /// Display-ready outcome message.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: String) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Toggle envelope carrying the new completion state, so the UI can pick
/// between its "completed" and "unchecked" notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskToggleResponse {
    /// Whether the toggle happened.
    pub ok: bool,
    /// New completion state on success.
    pub is_completed: Option<bool>,
    /// Display-ready outcome message.
    pub message: String,
}

/// Session envelope for sign-in/sign-out flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Display-ready outcome message.
    pub message: String,
}

/// Current session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatusResponse {
    /// Whether a provider credential is stored.
    pub signed_in: bool,
    /// The stored opaque credential, when present.
    pub credential: Option<String>,
}

/// Loads the full task list.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; unreadable state degrades to an empty list with a
///   diagnostic message.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> TaskListResponse {
    match with_task_store(|store| to_items(store.tasks())) {
        Ok(items) => {
            let message = showing_message(items.len());
            TaskListResponse { items, message }
        }
        Err(err) => TaskListResponse {
            items: Vec::new(),
            message: format!("task_list failed: {err}"),
        },
    }
}

/// Filters tasks by case-insensitive substring match.
///
/// # FFI contract
/// - Sync call, DB-backed execution; pure read, never mutates the store.
/// - Empty query returns the full list.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_search(query: String) -> TaskListResponse {
    match with_task_store(|store| {
        let hits = store.filter(query.as_str());
        to_items(&hits)
    }) {
        Ok(items) => {
            let message = showing_message(items.len());
            TaskListResponse { items, message }
        }
        Err(err) => TaskListResponse {
            items: Vec::new(),
            message: format!("task_search failed: {err}"),
        },
    }
}

/// Adds a task from raw input text.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Blank input (after trimming) is declined with `ok = false` and no write.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String) -> TaskActionResponse {
    let outcome = with_task_store(|store| store.add(text.as_str()));
    match outcome {
        Ok(Ok(Some(task))) => TaskActionResponse::success("Task added.", task.id.to_string()),
        Ok(Ok(None)) => TaskActionResponse::failure("Task text is empty."),
        Ok(Err(err)) => TaskActionResponse::failure(format!("task_add failed: {err}")),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Replaces the text of an existing task.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Blank replacement text or an unknown id is declined with `ok = false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(id: String, text: String) -> TaskActionResponse {
    let task_id = match parse_task_id(id.as_str()) {
        Ok(task_id) => task_id,
        Err(message) => return TaskActionResponse::failure(message),
    };
    if normalize_text(text.as_str()).is_none() {
        return TaskActionResponse::failure("Task text is empty.");
    }

    let outcome = with_task_store(|store| store.update(task_id, text.as_str()));
    match outcome {
        Ok(Ok(true)) => TaskActionResponse::success("Task updated.", task_id.to_string()),
        Ok(Ok(false)) => TaskActionResponse::failure("Task not found."),
        Ok(Err(err)) => TaskActionResponse::failure(format!("task_update failed: {err}")),
        Err(err) => TaskActionResponse::failure(format!("task_update failed: {err}")),
    }
}

/// Flips the completion flag of an existing task.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unknown ids are declined with `ok = false` and no write.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> TaskToggleResponse {
    let task_id = match parse_task_id(id.as_str()) {
        Ok(task_id) => task_id,
        Err(message) => {
            return TaskToggleResponse {
                ok: false,
                is_completed: None,
                message,
            }
        }
    };

    let outcome = with_task_store(|store| store.toggle_complete(task_id));
    match outcome {
        Ok(Ok(Some(task))) => TaskToggleResponse {
            ok: true,
            is_completed: Some(task.is_completed),
            message: if task.is_completed {
                "Task completed.".to_string()
            } else {
                "Task unchecked.".to_string()
            },
        },
        Ok(Ok(None)) => TaskToggleResponse {
            ok: false,
            is_completed: None,
            message: "Task not found.".to_string(),
        },
        Ok(Err(err)) => TaskToggleResponse {
            ok: false,
            is_completed: None,
            message: format!("task_toggle failed: {err}"),
        },
        Err(err) => TaskToggleResponse {
            ok: false,
            is_completed: None,
            message: format!("task_toggle failed: {err}"),
        },
    }
}

/// Deletes an existing task.
///
/// The confirmation dialog is the shell's responsibility; by the time this
/// call lands the user already confirmed.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unknown ids are declined with `ok = false` and no write.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: String) -> TaskActionResponse {
    let task_id = match parse_task_id(id.as_str()) {
        Ok(task_id) => task_id,
        Err(message) => return TaskActionResponse::failure(message),
    };

    let outcome = with_task_store(|store| store.remove(task_id));
    match outcome {
        Ok(Ok(true)) => TaskActionResponse::success("Task deleted.", task_id.to_string()),
        Ok(Ok(false)) => TaskActionResponse::failure("Task not found."),
        Ok(Err(err)) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Stores the opaque credential handed back by the identity provider.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - The credential is stored verbatim and never validated here.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_sign_in(credential: String) -> SessionActionResponse {
    match with_session(|session| session.store_credential(credential.as_str())) {
        Ok(Ok(())) => SessionActionResponse {
            ok: true,
            message: "Signed in.".to_string(),
        },
        Ok(Err(err)) => SessionActionResponse {
            ok: false,
            message: format!("session_sign_in failed: {err}"),
        },
        Err(err) => SessionActionResponse {
            ok: false,
            message: format!("session_sign_in failed: {err}"),
        },
    }
}

/// Reports whether a credential is stored, and which.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; an unreadable session reads as signed out.
#[flutter_rust_bridge::frb(sync)]
pub fn session_status() -> SessionStatusResponse {
    match with_session(|session| session.credential()) {
        Ok(Ok(credential)) => SessionStatusResponse {
            signed_in: credential.is_some(),
            credential,
        },
        Ok(Err(_)) | Err(_) => SessionStatusResponse {
            signed_in: false,
            credential: None,
        },
    }
}

/// Clears the stored credential.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Idempotent; signing out twice is fine.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn session_sign_out() -> SessionActionResponse {
    match with_session(|session| session.clear()) {
        Ok(Ok(())) => SessionActionResponse {
            ok: true,
            message: "Signed out.".to_string(),
        },
        Ok(Err(err)) => SessionActionResponse {
            ok: false,
            message: format!("session_sign_out failed: {err}"),
        },
        Err(err) => SessionActionResponse {
            ok: false,
            message: format!("session_sign_out failed: {err}"),
        },
    }
}

fn showing_message(count: usize) -> String {
    if count == 1 {
        "Showing 1 task.".to_string()
    } else {
        format!("Showing {count} tasks.")
    }
}

fn to_items(tasks: &[Task]) -> Vec<TaskItem> {
    tasks
        .iter()
        .map(|task| TaskItem {
            id: task.id.to_string(),
            text: task.text.clone(),
            is_completed: task.is_completed,
        })
        .collect()
}

fn parse_task_id(raw: &str) -> Result<TaskId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid task id `{raw}`"))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            let path = match std::env::var("TASKPAD_DB_PATH") {
                Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
                _ => std::env::temp_dir().join(DB_FILE_NAME),
            };
            info!(
                "event=db_path module=ffi status=ok path={}",
                path.display()
            );
            path
        })
        .clone()
}

fn with_task_store<T>(
    f: impl FnOnce(&mut TaskStore<SqliteKvStore<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("task db open failed: {err}"))?;
    let mut store = TaskStore::open(SqliteKvStore::new(&conn));
    Ok(f(&mut store))
}

fn with_session<T>(f: impl FnOnce(&SessionStore<SqliteKvStore<'_>>) -> T) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("session db open failed: {err}"))?;
    let session = SessionStore::new(SqliteKvStore::new(&conn));
    Ok(f(&session))
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, session_sign_in, session_sign_out, session_status,
        task_add, task_delete, task_list, task_search, task_toggle, task_update,
    };
    use std::sync::{Mutex, MutexGuard};
    use std::time::{SystemTime, UNIX_EPOCH};

    // Every call rewrites the whole collection under one key, so tests that
    // touch the shared per-process database must not interleave.
    static DB_GUARD: Mutex<()> = Mutex::new(());

    fn db_lock() -> MutexGuard<'static, ()> {
        DB_GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn added_task_shows_up_in_the_list() {
        let _guard = db_lock();
        let text = unique_token("list-me");

        let added = task_add(text.clone());
        assert!(added.ok, "{}", added.message);
        let task_id = added.task_id.clone().expect("add should return a task id");

        let listed = task_list();
        assert!(listed
            .items
            .iter()
            .any(|item| item.id == task_id && item.text == text && !item.is_completed));
        assert!(listed.message.starts_with("Showing "));
    }

    #[test]
    fn blank_add_is_declined() {
        let _guard = db_lock();

        let response = task_add("   ".to_string());
        assert!(!response.ok);
        assert!(response.task_id.is_none());
        assert_eq!(response.message, "Task text is empty.");
    }

    #[test]
    fn toggle_flips_and_flips_back() {
        let _guard = db_lock();

        let added = task_add(unique_token("toggle-me"));
        let task_id = added.task_id.expect("add should return a task id");

        let once = task_toggle(task_id.clone());
        assert!(once.ok, "{}", once.message);
        assert_eq!(once.is_completed, Some(true));
        assert_eq!(once.message, "Task completed.");

        let twice = task_toggle(task_id);
        assert_eq!(twice.is_completed, Some(false));
        assert_eq!(twice.message, "Task unchecked.");
    }

    #[test]
    fn update_rewrites_text_and_reports_unknown_ids() {
        let _guard = db_lock();

        let added = task_add(unique_token("update-me"));
        let task_id = added.task_id.expect("add should return a task id");

        let revised = unique_token("revised");
        let updated = task_update(task_id.clone(), revised.clone());
        assert!(updated.ok, "{}", updated.message);

        let listed = task_list();
        assert!(listed
            .items
            .iter()
            .any(|item| item.id == task_id && item.text == revised));

        let missing = task_update(
            "00000000-0000-4000-8000-000000000000".to_string(),
            "anywhere".to_string(),
        );
        assert!(!missing.ok);
        assert_eq!(missing.message, "Task not found.");
    }

    #[test]
    fn delete_removes_the_task() {
        let _guard = db_lock();

        let added = task_add(unique_token("delete-me"));
        let task_id = added.task_id.expect("add should return a task id");

        let deleted = task_delete(task_id.clone());
        assert!(deleted.ok, "{}", deleted.message);

        let listed = task_list();
        assert!(!listed.items.iter().any(|item| item.id == task_id));

        let again = task_delete(task_id);
        assert!(!again.ok);
        assert_eq!(again.message, "Task not found.");
    }

    #[test]
    fn garbled_task_id_is_rejected_up_front() {
        let response = task_delete("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid task id"));
    }

    #[test]
    fn search_matches_case_insensitively() {
        let _guard = db_lock();

        let token = unique_token("Search-Needle").to_uppercase();
        let added = task_add(token.clone());
        let task_id = added.task_id.expect("add should return a task id");

        let hits = task_search(token.to_lowercase());
        assert!(hits.items.iter().any(|item| item.id == task_id));
    }

    #[test]
    fn session_round_trip() {
        let _guard = db_lock();

        let credential = unique_token("opaque-token");
        let signed_in = session_sign_in(credential.clone());
        assert!(signed_in.ok, "{}", signed_in.message);

        let status = session_status();
        assert!(status.signed_in);
        assert_eq!(status.credential.as_deref(), Some(credential.as_str()));

        let signed_out = session_sign_out();
        assert!(signed_out.ok, "{}", signed_out.message);
        assert!(!session_status().signed_in);
    }
}
