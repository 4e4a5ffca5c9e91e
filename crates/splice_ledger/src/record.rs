//! Record model: identifiers, type descriptors, and record shapes.

use std::fmt;

/// Unique identifier for an addressable record.
///
/// Record ids are 32 bytes, equal to the `args` of the record's type
/// descriptor. Records created without a descriptor have no id and are
/// only reachable through their owner key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId([u8; 32]);

impl RecordId {
    /// Creates a record id from raw bytes.
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

    /// Parses a record id from a hex string (with or without a `0x` prefix).
    ///
    /// Returns `None` if the string is not exactly 32 hex-encoded bytes.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(s).ok()?;
        Self::from_slice(&decoded)
    }

    /// Creates a record id from a slice.
    ///
    /// Returns `None` if the slice is not exactly 32 bytes.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 32 {
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Renders the id as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.to_hex())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for RecordId {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<RecordId> for [u8; 32] {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// Ownership / lookup key for a record.
///
/// All records carrying the same owner key form one queryable set. For
/// segment records the owner key is the parent's binding key; for parent
/// records it is whatever lock material the publisher supplies.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerKey([u8; 32]);

impl OwnerKey {
    /// Creates an owner key from raw bytes.
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

    /// Renders the key as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerKey({})", self.to_hex())
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for OwnerKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Type descriptor of an addressable record.
///
/// A descriptor is owned exclusively by one record and never mutated after
/// creation. Its `args` double as the record's id; its hash is the binding
/// key that associates segment records with their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Code hash identifying the record type on the ledger.
    pub code_hash: [u8; 32],
    /// Per-record arguments; unique per descriptor.
    pub args: [u8; 32],
}

impl TypeDescriptor {
    /// Creates a descriptor from its parts.
    #[must_use]
    pub const fn new(code_hash: [u8; 32], args: [u8; 32]) -> Self {
        Self { code_hash, args }
    }

    /// Creates a descriptor with the given code hash and fresh random args.
    #[must_use]
    pub fn with_random_args(code_hash: [u8; 32]) -> Self {
        let mut args = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut args);
        Self { code_hash, args }
    }

    /// Returns the record id derived from this descriptor.
    #[must_use]
    pub const fn record_id(&self) -> RecordId {
        RecordId::from_bytes(self.args)
    }

    /// Canonical serialization: `code_hash || args`, 64 bytes.
    ///
    /// This is the exact preimage hashed to derive the binding key for
    /// segment records; changing it is a wire format change.
    #[must_use]
    pub fn canonical_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.code_hash);
        out[32..].copy_from_slice(&self.args);
        out
    }
}

/// A record as stored on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Ownership / lookup key.
    pub owner_key: OwnerKey,
    /// Type descriptor; present only for addressable records.
    pub type_descriptor: Option<TypeDescriptor>,
    /// Opaque record data. The ledger does not interpret it.
    pub data: Vec<u8>,
}

impl Record {
    /// Returns the record's id, if it is addressable.
    #[must_use]
    pub fn id(&self) -> Option<RecordId> {
        self.type_descriptor.as_ref().map(TypeDescriptor::record_id)
    }
}

/// Request to persist one record.
#[derive(Debug, Clone)]
pub struct CreateRecord {
    /// Ownership / lookup key for the new record.
    pub owner_key: OwnerKey,
    /// Type descriptor; `Some` makes the record addressable by id.
    pub type_descriptor: Option<TypeDescriptor>,
    /// Record data.
    pub data: Vec<u8>,
}

impl CreateRecord {
    /// Request for a record addressable only by owner key.
    #[must_use]
    pub fn owned(owner_key: OwnerKey, data: Vec<u8>) -> Self {
        Self {
            owner_key,
            type_descriptor: None,
            data,
        }
    }

    /// Request for an addressable record carrying a descriptor.
    #[must_use]
    pub fn addressable(owner_key: OwnerKey, descriptor: TypeDescriptor, data: Vec<u8>) -> Self {
        Self {
            owner_key,
            type_descriptor: Some(descriptor),
            data,
        }
    }
}

/// Handle returned after persisting a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHandle {
    /// Id of the new record, if it carried a descriptor.
    pub id: Option<RecordId>,
    /// Owner key the record was stored under.
    pub owner_key: OwnerKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_hex_roundtrip() {
        let id = RecordId::from_bytes([0xAB; 32]);
        let parsed = RecordId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn record_id_hex_with_prefix() {
        let id = RecordId::from_bytes([3; 32]);
        let parsed = RecordId::from_hex(&format!("0x{}", id.to_hex())).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn record_id_rejects_bad_lengths() {
        assert!(RecordId::from_hex("abcd").is_none());
        assert!(RecordId::from_slice(&[0u8; 31]).is_none());
        assert!(RecordId::from_slice(&[0u8; 33]).is_none());
    }

    #[test]
    fn descriptor_id_is_args() {
        let descriptor = TypeDescriptor::new([1; 32], [2; 32]);
        assert_eq!(descriptor.record_id(), RecordId::from_bytes([2; 32]));
    }

    #[test]
    fn descriptor_canonical_bytes_layout() {
        let descriptor = TypeDescriptor::new([1; 32], [2; 32]);
        let bytes = descriptor.canonical_bytes();
        assert_eq!(&bytes[..32], &[1; 32]);
        assert_eq!(&bytes[32..], &[2; 32]);
    }

    #[test]
    fn random_args_are_unique() {
        let a = TypeDescriptor::with_random_args([0; 32]);
        let b = TypeDescriptor::with_random_args([0; 32]);
        assert_ne!(a.args, b.args);
    }

    #[test]
    fn record_without_descriptor_has_no_id() {
        let record = Record {
            owner_key: OwnerKey::from_bytes([0; 32]),
            type_descriptor: None,
            data: vec![1, 2, 3],
        };
        assert!(record.id().is_none());
    }
}
