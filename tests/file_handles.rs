//! Stopping an iteration early must not keep chunk files open.
//!
//! Kept in its own test binary so that no other test opens files while the
//! descriptor table is being counted.

#![cfg(target_os = "linux")]

use ndarray::Array1;
use ndarray_npy::write_npy;
use std::fs;
use tempfile::tempdir;
use writ::prelude::*;

fn open_descriptors() -> usize {
    fs::read_dir("/proc/self/fd").unwrap().count()
}

#[test]
fn test_early_termination_releases_files() {
    let dir = tempdir().unwrap();
    for key in 0..8 {
        write_npy(
            dir.path().join(format!("x_{}.npy", key)),
            &Array1::from_elem(16, key as f32),
        )
        .unwrap();
    }
    let pattern = dir.path().join("x_{}.npy").to_string_lossy().into_owned();
    let reader: StripedReader<NpyLoader<f32>> = StripedReader::open(pattern).unwrap();

    let baseline = open_descriptors();

    let mut items = reader.iter();
    let first = items.next().unwrap().unwrap();
    assert_eq!(first.into_single().unwrap().len(), 16);
    assert_eq!(open_descriptors(), baseline);

    drop(items);
    assert_eq!(open_descriptors(), baseline);

    let mut replicas = reader.replicas(1).unwrap();
    assert!(replicas.next().unwrap().is_err());
    drop(replicas);
    assert_eq!(open_descriptors(), baseline);
}
