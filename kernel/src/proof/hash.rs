//! Canonical hashing types and domain separation constants.
//!
//! Algorithm: SHA-256 for every digest. Each digest is computed over
//! `domain_prefix || data`, where the prefix is a null-terminated byte string
//! selected through [`HashDomain`].
//!
//! **Exactly one place defines canonical hashing.** Grid fingerprints and
//! plan digests both route through [`canonical_hash`].

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the format is invalid (missing colon,
    /// empty algorithm, or empty digest).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// Abbreviated hex digest for log lines (first 12 hex characters).
    #[must_use]
    pub fn short(&self) -> &str {
        let hex = self.hex_digest();
        &hex[..hex.len().min(12)]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Typed domain separator for [`canonical_hash`].
///
/// Every variant maps to a unique, null-terminated byte string used as a
/// SHA-256 prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Flattened board fingerprint (log correlation, fixture output).
    Grid,
    /// Ordered key plan produced by the translator.
    Plan,
}

impl HashDomain {
    /// All domain variants in declaration order.
    pub const ALL: &'static [HashDomain] = &[Self::Grid, Self::Plan];

    /// The raw domain-separator bytes (null-terminated).
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Grid => b"RUSHLANE::GRID::V1\0",
            Self::Plan => b"RUSHLANE::PLAN::V1\0",
        }
    }
}

impl std::fmt::Display for HashDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid => f.write_str("Grid"),
            Self::Plan => f.write_str("Plan"),
        }
    }
}

/// Compute the canonical hash of a byte slice with domain separation.
///
/// Result format: `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    hasher.update(data);
    let digest = hasher.finalize();
    let full = format!("sha256:{}", hex::encode(digest));
    // "sha256" is six bytes; the separator sits right after it.
    ContentHash { full, colon: 6 }
}
