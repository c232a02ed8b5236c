// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access credentials.
//!
//! The credential is shared between the gateway and the remote store so
//! that an authentication failure seen on any request clears it for all
//! subsequent ones.

use std::sync::{Arc, RwLock};
use time::OffsetDateTime;

const LOCAL_TOKEN_PREFIX: &str = "demo_token_";

/// Outcome of a credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Valid,
    Invalid,
    Missing,
}

/// An opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Mints a token for local-only use.
    #[must_use]
    pub fn local() -> Self {
        let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self(format!(
            "{LOCAL_TOKEN_PREFIX}{timestamp}_{}",
            rand::random::<u32>()
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for tokens minted by [`Credential::local`].
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_TOKEN_PREFIX)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Shared, clearable holder for the current credential.
#[derive(Debug, Clone, Default)]
pub struct CredentialSlot {
    inner: Arc<RwLock<Option<Credential>>>,
}

impl CredentialSlot {
    #[must_use]
    pub fn new(credential: Option<Credential>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(credential)),
        }
    }

    /// Returns the current credential, if any.
    #[must_use]
    pub fn get(&self) -> Option<Credential> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set(&self, credential: Credential) {
        match self.inner.write() {
            Ok(mut guard) => *guard = Some(credential),
            Err(poisoned) => *poisoned.into_inner() = Some(credential),
        }
    }

    pub fn clear(&self) {
        match self.inner.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_token() {
        let credential: Credential = Credential::new("secret-token");
        assert!(!format!("{credential:?}").contains("secret-token"));
    }

    #[test]
    fn test_local_credentials_are_recognised() {
        assert!(Credential::local().is_local());
        assert!(!Credential::new("remote-token").is_local());
    }

    #[test]
    fn test_slot_is_shared_between_clones() {
        let slot: CredentialSlot = CredentialSlot::default();
        let other: CredentialSlot = slot.clone();
        slot.set(Credential::new("abc"));
        assert_eq!(other.get(), Some(Credential::new("abc")));
        other.clear();
        assert!(slot.get().is_none());
    }
}
