use taskpad_core::db::{open_db, open_db_in_memory};
use taskpad_core::{KvStore, SqliteKvStore};

#[test]
fn set_then_get_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);

    kv.set("greeting", "hello").unwrap();
    assert_eq!(kv.get("greeting").unwrap().as_deref(), Some("hello"));
}

#[test]
fn set_replaces_the_whole_value() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);

    kv.set("tasks", "[1]").unwrap();
    kv.set("tasks", "[1,2]").unwrap();

    assert_eq!(kv.get("tasks").unwrap().as_deref(), Some("[1,2]"));
}

#[test]
fn get_missing_key_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);

    assert_eq!(kv.get("nothing here").unwrap(), None);
}

#[test]
fn remove_deletes_the_key_and_tolerates_absence() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);

    kv.set("token", "abc").unwrap();
    kv.remove("token").unwrap();
    assert_eq!(kv.get("token").unwrap(), None);

    kv.remove("token").unwrap();
}

#[test]
fn values_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpad.db");

    {
        let conn = open_db(&path).unwrap();
        let kv = SqliteKvStore::new(&conn);
        kv.set("tasks", r#"[{"id":"x"}]"#).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let kv = SqliteKvStore::new(&conn);
    assert_eq!(kv.get("tasks").unwrap().as_deref(), Some(r#"[{"id":"x"}]"#));
}

#[test]
fn keys_are_independent() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::new(&conn);

    kv.set("tasks", "[]").unwrap();
    kv.set("user_token", "opaque").unwrap();
    kv.remove("tasks").unwrap();

    assert_eq!(kv.get("user_token").unwrap().as_deref(), Some("opaque"));
}
