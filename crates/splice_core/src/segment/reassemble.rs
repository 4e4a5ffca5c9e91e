//! Segment reassembly.

use crate::digest::ContentDigest;
use crate::error::{StoreError, StoreResult};
use splice_ledger::Record;
use tracing::warn;

/// Reassembles located segment records into the original byte stream.
///
/// Sorts ascending by the index byte (the sole order), strips the index
/// prefix, and concatenates the payloads. Validations run before any
/// bytes are returned:
///
/// - a record whose data is one byte or shorter has no payload →
///   [`StoreError::EmptySegment`]
/// - two records claiming the same index → [`StoreError::DuplicateIndex`]
/// - indices not exactly `{0, …, n-1}` → [`StoreError::Incomplete`]
///
/// `Incomplete` and the corrupt errors are deliberately distinct so
/// callers can tell "still being written" from "damaged".
///
/// # Errors
///
/// See above. Use [`reassemble_verified`] when the parent's digest is at
/// hand; the resolver always does.
pub fn reassemble(records: &[Record]) -> StoreResult<Vec<u8>> {
    let mut segments = Vec::with_capacity(records.len());
    for record in records {
        if record.data.len() <= 1 {
            return Err(StoreError::EmptySegment {
                len: record.data.len(),
            });
        }
        segments.push((record.data[0], &record.data[1..]));
    }
    segments.sort_by_key(|(index, _)| *index);

    for window in segments.windows(2) {
        if window[0].0 == window[1].0 {
            return Err(StoreError::DuplicateIndex { index: window[0].0 });
        }
    }

    // Sorted and duplicate-free, so contiguity from zero means the last
    // index equals n-1.
    let contiguous = match segments.last() {
        Some((last, _)) => usize::from(*last) == segments.len() - 1,
        None => true,
    };
    if !contiguous {
        let missing = missing_indices(&segments);
        warn!(
            found = segments.len(),
            ?missing,
            "segment set has index gaps"
        );
        return Err(StoreError::Incomplete {
            found: segments.len(),
            missing,
        });
    }

    let total: usize = segments.iter().map(|(_, payload)| payload.len()).sum();
    let mut content = Vec::with_capacity(total);
    for (_, payload) in segments {
        content.extend_from_slice(payload);
    }
    Ok(content)
}

/// Reassembles and verifies the result against the parent's stored digest.
///
/// # Errors
///
/// Everything [`reassemble`] returns, plus [`StoreError::DigestMismatch`]
/// when the reconstructed bytes do not hash to `expected`.
pub fn reassemble_verified(records: &[Record], expected: &ContentDigest) -> StoreResult<Vec<u8>> {
    let content = reassemble(records)?;
    let actual = ContentDigest::compute(&content);
    if actual != *expected {
        warn!(expected = %expected, actual = %actual, "reassembled content digest mismatch");
        return Err(StoreError::DigestMismatch {
            expected: *expected,
            actual,
        });
    }
    Ok(content)
}

/// Indices absent from `[0, max]` given a sorted, duplicate-free set.
fn missing_indices(segments: &[(u8, &[u8])]) -> Vec<u8> {
    let max = segments.last().map(|(index, _)| *index).unwrap_or(0);
    let mut missing = Vec::new();
    let mut present = segments.iter().map(|(index, _)| *index).peekable();
    for index in 0..=max {
        if present.peek() == Some(&index) {
            present.next();
        } else {
            missing.push(index);
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::chunk_content;
    use proptest::prelude::*;
    use splice_ledger::OwnerKey;

    fn record(data: Vec<u8>) -> Record {
        Record {
            owner_key: OwnerKey::from_bytes([0; 32]),
            type_descriptor: None,
            data,
        }
    }

    fn records_from_content(content: &[u8], segment_size: usize) -> Vec<Record> {
        chunk_content(content, segment_size)
            .unwrap()
            .iter()
            .map(|segment| record(segment.encode()))
            .collect()
    }

    #[test]
    fn reassemble_restores_content() {
        let content: Vec<u8> = (0..=255).cycle().take(2500).collect();
        let records = records_from_content(&content, 100);
        assert_eq!(reassemble(&records).unwrap(), content);
    }

    #[test]
    fn order_independence() {
        let content: Vec<u8> = (0..=255).cycle().take(950).collect();
        let mut records = records_from_content(&content, 100);
        records.reverse();
        assert_eq!(reassemble(&records).unwrap(), content);
    }

    #[test]
    fn missing_index_is_incomplete() {
        let content = vec![7u8; 50];
        let mut records = records_from_content(&content, 10);
        records.remove(3);
        let result = reassemble(&records);
        assert!(
            matches!(result, Err(StoreError::Incomplete { found: 4, ref missing }) if missing == &vec![3]),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn duplicate_index_is_corrupt() {
        let content = vec![7u8; 50];
        let mut records = records_from_content(&content, 10);
        records.push(record(vec![2, 0xEE]));
        let result = reassemble(&records);
        assert!(matches!(result, Err(StoreError::DuplicateIndex { index: 2 })));
    }

    #[test]
    fn index_only_record_is_corrupt() {
        let records = vec![record(vec![0, 1]), record(vec![1])];
        let result = reassemble(&records);
        assert!(matches!(result, Err(StoreError::EmptySegment { len: 1 })));
    }

    #[test]
    fn empty_data_record_is_corrupt() {
        let result = reassemble(&[record(Vec::new())]);
        assert!(matches!(result, Err(StoreError::EmptySegment { len: 0 })));
    }

    #[test]
    fn set_not_starting_at_zero_is_incomplete() {
        let records = vec![record(vec![1, 0xAA]), record(vec![2, 0xBB])];
        let result = reassemble(&records);
        assert!(
            matches!(result, Err(StoreError::Incomplete { found: 2, ref missing }) if missing == &vec![0])
        );
    }

    #[test]
    fn empty_record_set_yields_empty_content() {
        // The locator already rejects empty sets; reassembly itself treats
        // zero segments as zero bytes.
        assert!(reassemble(&[]).unwrap().is_empty());
    }

    #[test]
    fn verified_accepts_matching_digest() {
        let content = vec![9u8; 123];
        let records = records_from_content(&content, 16);
        let digest = ContentDigest::compute(&content);
        assert_eq!(reassemble_verified(&records, &digest).unwrap(), content);
    }

    #[test]
    fn verified_rejects_tampered_payload() {
        let content = vec![9u8; 123];
        let mut records = records_from_content(&content, 16);
        records[1].data[5] ^= 0xFF;
        let digest = ContentDigest::compute(&content);
        let result = reassemble_verified(&records, &digest);
        assert!(matches!(result, Err(StoreError::DigestMismatch { .. })));
    }

    proptest! {
        #[test]
        fn shuffled_records_reassemble_identically(
            content in prop::collection::vec(any::<u8>(), 1..2048),
            segment_size in 8usize..64,
            seed in any::<u64>(),
        ) {
            let mut records = records_from_content(&content, segment_size);

            // Deterministic shuffle from the seed.
            let mut state = seed | 1;
            for i in (1..records.len()).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let j = (state >> 33) as usize % (i + 1);
                records.swap(i, j);
            }

            prop_assert_eq!(reassemble(&records).unwrap(), content);
        }
    }
}
