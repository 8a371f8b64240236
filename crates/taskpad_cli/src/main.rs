//! CLI smoke entry point.
//!
//! Runs the task lifecycle against an in-memory database, so a plain
//! `cargo run` proves core linkage and the persistence contract without
//! touching the Flutter/FFI runtime setup.

use taskpad_core::db::open_db_in_memory;
use taskpad_core::{SqliteKvStore, TaskStore};

fn main() {
    println!("taskpad_core ping={}", taskpad_core::ping());
    println!("taskpad_core version={}", taskpad_core::core_version());

    if let Err(err) = smoke() {
        eprintln!("smoke run failed: {err}");
        std::process::exit(1);
    }
}

fn smoke() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let mut store = TaskStore::open(SqliteKvStore::new(&conn));

    if let Some(task) = store.add("smoke task")? {
        store.toggle_complete(task.id)?;
        store.remove(task.id)?;
    }

    println!("taskpad_core smoke=ok tasks={}", store.tasks().len());
    Ok(())
}
