//! Canonical hashing with domain separation.
//!
//! **Exactly one place defines canonical hashing.** State keys and report
//! digests are both `SHA-256(domain || data)` where the domain prefix is a
//! null-terminated byte string from [`HashDomain`]. Distinct domains keep
//! identical payloads in different roles from colliding.

use sha2::{Digest, Sha256};

/// Typed domain separator for [`canonical_hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Board identity bytes, used as the duplicate-state key.
    StateKey,
    /// Serialized solve/run reports.
    RunReport,
    /// Raw level text, so a report can name the level it solved.
    LevelText,
}

impl HashDomain {
    /// All domains in declaration order.
    pub const ALL: &'static [HashDomain] = &[Self::StateKey, Self::RunReport, Self::LevelText];

    /// The raw domain-separator bytes (null-terminated).
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::StateKey => b"PUSHBOX::STATE_KEY::V1\0",
            Self::RunReport => b"PUSHBOX::RUN_REPORT::V1\0",
            Self::LevelText => b"PUSHBOX::LEVEL_TEXT::V1\0",
        }
    }
}

/// A SHA-256 digest.
///
/// Displays (and parses) as `"sha256:<64 lowercase hex>"`. Compared and
/// hashed by digest bytes, so it is cheap to use as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    digest: [u8; 32],
}

impl ContentHash {
    /// Algorithm tag used in the string form.
    pub const ALGORITHM: &'static str = "sha256";

    #[must_use]
    pub const fn from_digest(digest: [u8; 32]) -> Self {
        Self { digest }
    }

    /// Parse from `"sha256:<hex>"`.
    ///
    /// Returns `None` for a different algorithm, a missing separator, or a
    /// digest that is not exactly 32 hex-encoded bytes.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (algorithm, hex_digest) = s.split_once(':')?;
        if algorithm != Self::ALGORITHM {
            return None;
        }
        let mut digest = [0u8; 32];
        hex::decode_to_slice(hex_digest, &mut digest).ok()?;
        Some(Self { digest })
    }

    #[must_use]
    pub const fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    /// Lowercase hex of the digest, without the algorithm tag.
    #[must_use]
    pub fn hex_digest(&self) -> String {
        hex::encode(self.digest)
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", Self::ALGORITHM, self.hex_digest())
    }
}

/// Compute the canonical hash of `data` under `domain`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    ContentHash::from_digest(hasher.finalize().into())
}
