//! Property tests for chunk ordering and alignment

use ndarray::Array1;
use ndarray_npy::write_npy;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::tempdir;
use writ::prelude::*;

fn write_keys(dir: &Path, prefix: &str, keys: &BTreeSet<u32>) {
    for key in keys {
        write_npy(
            dir.join(format!("{}_{}.npy", prefix, key)),
            &Array1::from_elem(1, *key as f64),
        )
        .unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Integer keys sort by value whatever their digit count
    #[test]
    fn test_key_order_matches_numeric_order(values in prop::collection::vec(any::<i64>(), 1..50)) {
        let mut keys: Vec<ChunkKey> = values.iter().map(|v| ChunkKey::parse(&v.to_string())).collect();
        keys.sort();
        let mut sorted = values.clone();
        sorted.sort();
        let expected: Vec<ChunkKey> = sorted.iter().map(|v| ChunkKey::from(*v)).collect();
        prop_assert_eq!(keys, expected);
    }

    /// Keys wider than any machine integer still order by value
    #[test]
    fn test_wide_keys_order_by_width_then_digits(
        a in "[1-9][0-9]{20,45}",
        b in "[1-9][0-9]{20,45}",
        zeros in 0usize..4,
    ) {
        let padded = format!("{}{}", "0".repeat(zeros), a);
        let expected = a.len().cmp(&b.len()).then_with(|| a.cmp(&b));
        prop_assert_eq!(ChunkKey::parse(&padded).cmp(&ChunkKey::parse(&b)), expected);
        let negated = ChunkKey::parse(&format!("-{}", b)).cmp(&ChunkKey::parse(&format!("-{}", padded)));
        prop_assert_eq!(negated, expected);
    }

    /// Text keys always follow numeric keys
    #[test]
    fn test_text_keys_follow_numbers(number in any::<u32>(), text in "[a-z][a-z0-9]{0,8}") {
        prop_assert!(ChunkKey::parse(&number.to_string()) < ChunkKey::parse(&text));
    }

    /// Striped readers serve strictly ascending keys, identically on every pass
    #[test]
    fn test_striped_order_and_stability(keys in prop::collection::btree_set(0u32..10_000, 1..24)) {
        let dir = tempdir().unwrap();
        write_keys(dir.path(), "x", &keys);

        let pattern = dir.path().join("x_{}.npy").to_string_lossy().into_owned();
        let reader: StripedReader<NpyLoader<f64>> = StripedReader::open(pattern).unwrap();

        let pass = |reader: &StripedReader<NpyLoader<f64>>| -> Vec<f64> {
            reader
                .iter()
                .map(|item| *item.unwrap().into_single().unwrap().iter().next().unwrap())
                .collect()
        };
        let first = pass(&reader);
        let second = pass(&reader);

        let expected: Vec<f64> = keys.iter().map(|k| *k as f64).collect();
        prop_assert_eq!(&first, &expected);
        prop_assert_eq!(first, second);
    }

    /// Paired readers serve exactly the shared keys, one array per pattern
    #[test]
    fn test_paired_serves_intersection(
        left in prop::collection::btree_set(0u32..40, 1..20),
        right in prop::collection::btree_set(0u32..40, 1..20),
    ) {
        let dir = tempdir().unwrap();
        write_keys(dir.path(), "a", &left);
        write_keys(dir.path(), "b", &right);

        let config = PairedConfig {
            parent: Some(dir.path().to_path_buf()),
            ..PairedConfig::default()
        };
        let reader: PairedDirReader<NpyLoader<f64>> =
            PairedDirReader::open_with_config(vec!["a_{}.npy", "b_{}.npy"], config).unwrap();

        let shared: Vec<ChunkKey> = left
            .intersection(&right)
            .map(|k| ChunkKey::from(i64::from(*k)))
            .collect();
        let served: Vec<ChunkKey> = reader.chunk_sets().iter().map(|s| s.key.clone()).collect();
        prop_assert_eq!(&served, &shared);

        for item in &reader {
            prop_assert_eq!(item.unwrap().len(), 2);
        }
    }
}
