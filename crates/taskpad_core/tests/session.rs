use taskpad_core::db::open_db_in_memory;
use taskpad_core::{KvStore, SessionStore, SqliteKvStore, TaskStore, CREDENTIAL_KEY, TASKS_KEY};

#[test]
fn credential_round_trips_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let session = SessionStore::new(SqliteKvStore::new(&conn));

    session.store_credential("ya29.opaque-provider-token").unwrap();
    assert_eq!(
        session.credential().unwrap().as_deref(),
        Some("ya29.opaque-provider-token")
    );
    assert!(session.signed_in().unwrap());
}

#[test]
fn absent_credential_reads_as_signed_out() {
    let conn = open_db_in_memory().unwrap();
    let session = SessionStore::new(SqliteKvStore::new(&conn));

    assert_eq!(session.credential().unwrap(), None);
    assert!(!session.signed_in().unwrap());
}

#[test]
fn clear_removes_the_credential_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let session = SessionStore::new(SqliteKvStore::new(&conn));

    session.store_credential("short-lived").unwrap();
    session.clear().unwrap();
    assert!(!session.signed_in().unwrap());

    session.clear().unwrap();
}

#[test]
fn replacing_the_credential_keeps_only_the_latest() {
    let conn = open_db_in_memory().unwrap();
    let session = SessionStore::new(SqliteKvStore::new(&conn));

    session.store_credential("first").unwrap();
    session.store_credential("second").unwrap();
    assert_eq!(session.credential().unwrap().as_deref(), Some("second"));
}

#[test]
fn session_and_tasks_share_the_facility_without_clashing() {
    let conn = open_db_in_memory().unwrap();
    let session = SessionStore::new(SqliteKvStore::new(&conn));
    let mut store = TaskStore::open(SqliteKvStore::new(&conn));

    session.store_credential("still here").unwrap();
    store.add("unrelated task").unwrap();

    let probe = SqliteKvStore::new(&conn);
    assert!(probe.get(TASKS_KEY).unwrap().is_some());
    assert_eq!(
        probe.get(CREDENTIAL_KEY).unwrap().as_deref(),
        Some("still here")
    );
}
