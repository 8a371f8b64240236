//! FFI bridge crate for the Taskpad mobile shell.
//!
//! The UI consumes the core exclusively through [`api`]; nothing else in the
//! workspace is visible across the bridge.

pub mod api;
