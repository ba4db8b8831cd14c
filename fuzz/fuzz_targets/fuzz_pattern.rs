#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;
use writ::reader::{ChunkKey, ChunkPattern};

fuzz_target!(|data: &[u8]| {
    // Split the input into a pattern and a candidate path
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (template, candidate) = text.split_once('\n').unwrap_or((text, ""));

    // Parsing must either succeed or fail with an error, never panic
    let Ok(pattern) = ChunkPattern::parse(template) else {
        return;
    };
    let _ = pattern.glob_pattern();

    // Any extracted key must classify and order without panicking
    if let Some(raw) = pattern.extract_key(Path::new(candidate)) {
        assert!(!raw.is_empty());
        let key = ChunkKey::parse(&raw);
        assert_eq!(key.cmp(&key), std::cmp::Ordering::Equal);
    }

    let resolved = pattern.resolve(candidate);
    let _ = pattern.extract_key(Path::new(&resolved));
});
