//! Session credential persistence.
//!
//! # Responsibility
//! - Keep the access credential issued by the external identity provider.
//!
//! # Invariants
//! - The credential is opaque: stored and returned verbatim, never inspected,
//!   validated or refreshed here.
//! - Credential values are never logged.

use crate::storage::kv::{KvResult, KvStore};
use log::info;

/// Key under which the provider-issued credential lives.
pub const CREDENTIAL_KEY: &str = "user_token";

/// Stores the opaque access credential the identity provider hands back on a
/// successful sign-in, through the same durable facility as the task list.
pub struct SessionStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> SessionStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Persists the credential from a successful provider handshake.
    pub fn store_credential(&self, credential: &str) -> KvResult<()> {
        self.kv.set(CREDENTIAL_KEY, credential)?;
        info!("event=session_sign_in module=session status=ok");
        Ok(())
    }

    /// Returns the stored credential, if any.
    pub fn credential(&self) -> KvResult<Option<String>> {
        self.kv.get(CREDENTIAL_KEY)
    }

    /// Whether a credential is currently stored.
    pub fn signed_in(&self) -> KvResult<bool> {
        Ok(self.credential()?.is_some())
    }

    /// Removes the stored credential. Clearing an absent credential is fine.
    pub fn clear(&self) -> KvResult<()> {
        self.kv.remove(CREDENTIAL_KEY)?;
        info!("event=session_sign_out module=session status=ok");
        Ok(())
    }
}
