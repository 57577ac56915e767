//! Randomized snapshot properties over arbitrary insertion sequences.

use std::collections::BTreeMap;

use iradix::{decode_tree, encode_tree, BytesValueEncoder, CodecError, Tree, ValueEncoder};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const BYTES: &dyn ValueEncoder<Vec<u8>> = &BytesValueEncoder;

fn entries() -> impl Strategy<Value = Vec<(Vec<u8>, Option<Vec<u8>>)>> {
    // A small alphabet makes shared prefixes and node splits likely.
    let byte = prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), any::<u8>()];
    let key = proptest::collection::vec(byte, 0..8);
    let value = proptest::option::of(proptest::collection::vec(any::<u8>(), 0..6));
    proptest::collection::vec((key, value), 0..40)
}

fn build(entries: &[(Vec<u8>, Option<Vec<u8>>)]) -> Tree<Vec<u8>> {
    entries
        .iter()
        .fold(Tree::new(), |tree, (key, value)| tree.insert(key, value.clone()).0)
}

proptest! {
    #[test]
    fn roundtrip_preserves_structure(entries in entries()) {
        let tree = build(&entries);
        let bytes = encode_tree(Some(BYTES), &tree).unwrap();
        let back = decode_tree(Some(BYTES), &bytes).unwrap();
        prop_assert_eq!(&back, &tree);

        let expected: BTreeMap<_, _> = entries.iter().cloned().collect();
        prop_assert_eq!(back.len(), expected.len());
        for (key, value) in &expected {
            prop_assert!(back.contains_key(key));
            prop_assert_eq!(back.get(key), value.as_ref());
        }
    }

    #[test]
    fn insertion_order_does_not_change_bytes(entries in entries(), seed in any::<u64>()) {
        // Keep only the last write per key so every order stores the same map.
        let map: BTreeMap<_, _> = entries.into_iter().collect();
        let mut shuffled: Vec<_> = map.into_iter().collect();
        let ordered = build(&shuffled);
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
        let reordered = build(&shuffled);
        prop_assert_eq!(
            encode_tree(Some(BYTES), &ordered).unwrap(),
            encode_tree(Some(BYTES), &reordered).unwrap()
        );
    }

    #[test]
    fn truncated_snapshot_never_decodes(entries in entries(), cut in any::<prop::sample::Index>()) {
        let tree = build(&entries);
        let bytes = encode_tree(Some(BYTES), &tree).unwrap();
        let cut = cut.index(bytes.len());
        prop_assert_eq!(
            decode_tree(Some(BYTES), &bytes[..cut]).unwrap_err(),
            CodecError::TruncatedInput
        );
    }

    #[test]
    fn without_encoder_values_vanish(entries in entries()) {
        let tree = build(&entries);
        let bytes = encode_tree(None, &tree).unwrap();
        let back: Tree<Vec<u8>> = decode_tree(None, &bytes).unwrap();
        prop_assert_eq!(back.len(), tree.len());
        prop_assert!(back.leaves().iter().all(|leaf| leaf.value().is_none()));
        let keys: Vec<&[u8]> = back.leaves().iter().map(|leaf| leaf.key()).collect();
        let source_keys: Vec<&[u8]> = tree.leaves().iter().map(|leaf| leaf.key()).collect();
        prop_assert_eq!(keys, source_keys);
    }
}
