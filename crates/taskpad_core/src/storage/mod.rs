//! Durable key-value storage facility.
//!
//! # Responsibility
//! - Define the get/set/remove contract the rest of the core persists through.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - One key maps to one whole serialized value; `set` replaces, never appends.
//! - Implementations surface transport failures instead of masking them.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod kv;
