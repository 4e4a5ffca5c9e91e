//! Binding key derivation.

use sha2::{Digest, Sha256};
use splice_ledger::{OwnerKey, TypeDescriptor};
use std::fmt;

/// Deterministic key binding a set of segment records to one parent.
///
/// The key is the SHA-256 hash of the parent descriptor's canonical
/// serialization - the same hash the ledger model uses for record identity
/// material, so any party holding the public parent record can recompute
/// it. Every segment belonging to a parent is stored under this key as its
/// owner key; distinct parents yield distinct keys with overwhelming
/// probability.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingKey([u8; 32]);

impl BindingKey {
    /// Derives the binding key for a parent's type descriptor.
    #[must_use]
    pub fn derive(descriptor: &TypeDescriptor) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(descriptor.canonical_bytes());
        Self(hasher.finalize().into())
    }

    /// Creates a binding key from raw bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the owner key segments are stored under.
    #[must_use]
    pub const fn owner_key(&self) -> OwnerKey {
        OwnerKey::from_bytes(self.0)
    }

    /// Renders the key as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BindingKey({})", self.to_hex())
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<BindingKey> for OwnerKey {
    fn from(key: BindingKey) -> Self {
        key.owner_key()
    }
}
