//! Property-based test generators using proptest.
//!
//! Provides strategies for generating content buffers, media types, and
//! segment parameters that maintain the store's invariants.

use proptest::prelude::*;
use splice_ledger::TypeDescriptor;

/// Strategy for content buffers up to `max_len` bytes.
pub fn content_strategy(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Strategy for plausible, unmarked media-type strings.
pub fn media_type_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{2,10}/[a-z0-9.-]{1,12}(\\+[a-z0-9]{1,8})?")
        .expect("Invalid regex")
        .prop_filter("must not carry the marker suffix", |ty| {
            !ty.ends_with("+splice")
        })
}

/// Strategy for segment sizes spanning tiny to beyond the default.
pub fn segment_size_strategy() -> impl Strategy<Value = usize> {
    1usize..=(16 * 1024)
}

/// Strategy for type descriptors.
pub fn descriptor_strategy() -> impl Strategy<Value = TypeDescriptor> {
    (
        prop::array::uniform32(any::<u8>()),
        prop::array::uniform32(any::<u8>()),
    )
        .prop_map(|(code_hash, args)| TypeDescriptor::new(code_hash, args))
}

/// Strategy producing a content buffer together with a segment size that
/// can hold it (at most 256 segments).
pub fn chunkable_content_strategy() -> impl Strategy<Value = (Vec<u8>, usize)> {
    (1usize..=256).prop_flat_map(|segment_size| {
        let max_len = segment_size * 256;
        (
            prop::collection::vec(any::<u8>(), 0..=max_len.min(8192)),
            Just(segment_size),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use splice_core::segment::{chunk_content, MAX_SEGMENTS};

    proptest! {
        #[test]
        fn media_types_are_never_marked(ty in media_type_strategy()) {
            prop_assert!(!ty.ends_with("+splice"));
            prop_assert!(ty.contains('/'));
        }

        #[test]
        fn chunkable_content_always_chunks((content, segment_size) in chunkable_content_strategy()) {
            let segments = chunk_content(&content, segment_size).unwrap();
            prop_assert!(segments.len() <= MAX_SEGMENTS);
        }

        #[test]
        fn descriptors_have_distinct_binding_keys(
            a in descriptor_strategy(),
            b in descriptor_strategy(),
        ) {
            use splice_core::BindingKey;
            prop_assume!(a != b);
            prop_assert_ne!(BindingKey::derive(&a), BindingKey::derive(&b));
        }
    }
}
