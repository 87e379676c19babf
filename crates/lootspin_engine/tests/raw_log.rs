use std::fs;
use std::sync::Arc;
use std::thread;

use lootspin_engine::{ensure_parent_dir, RawResultLog, ResultLogger};
use serde_json::{json, Value};
use tempfile::TempDir;

#[test]
fn creates_missing_parent_dir() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("raw.json");
    ensure_parent_dir(&target).unwrap();
    assert!(temp.path().join("nested").is_dir());
}

#[test]
fn parent_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let log = RawResultLog::new(file_path.join("raw.json"));
    assert!(log.append(&json!([])).is_err());
}

#[test]
fn appends_pretty_records_with_separator() {
    let temp = TempDir::new().unwrap();
    let log = RawResultLog::new(temp.path().join("raw.json"));

    log.append(&json!([{ "index": 1 }])).unwrap();
    log.append(&json!([])).unwrap();

    let content = fs::read_to_string(log.path()).unwrap();
    assert_eq!(content, "[\n  {\n    \"index\": 1\n  }\n],\n[],\n");
}

#[test]
fn concurrent_writers_never_interleave_records() {
    let temp = TempDir::new().unwrap();
    let log = Arc::new(RawResultLog::new(temp.path().join("raw.json")));

    let writers: Vec<_> = (0..8)
        .map(|writer| {
            let log = log.clone();
            thread::spawn(move || {
                for n in 0..25 {
                    let body = json!([{ "writer": writer, "n": n, "pad": "x".repeat(512) }]);
                    log.append(&body).unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let content = fs::read_to_string(log.path()).unwrap();
    let wrapped = format!("[{}]", content.trim_end().trim_end_matches(','));
    let records: Vec<Value> = serde_json::from_str(&wrapped).unwrap();
    assert_eq!(records.len(), 200);
}
