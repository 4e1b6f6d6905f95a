//! Canonical state keys for duplicate detection.

use pushbox_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::contract::SearchConfiguration;

/// Fingerprint of a configuration's identity bytes.
///
/// Two configurations with equal keys are treated as the same state for
/// pruning. The move chain that produced a configuration never enters the
/// key. Compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(ContentHash);

impl StateKey {
    /// `canonical_hash(StateKey, config.identity_bytes())`.
    #[must_use]
    pub fn of<C: SearchConfiguration>(config: &C) -> Self {
        Self::from_identity_bytes(&config.identity_bytes())
    }

    #[must_use]
    pub fn from_identity_bytes(bytes: &[u8]) -> Self {
        Self(canonical_hash(HashDomain::StateKey, bytes))
    }

    #[must_use]
    pub fn content_hash(&self) -> &ContentHash {
        &self.0
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
