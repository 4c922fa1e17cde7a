//! JSONL sink behavior against a temp directory.

use pairscrape::sink::{JsonlSink, ResultSink};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn append_writes_one_json_line_per_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dataset.jsonl");
    let sink = JsonlSink::new(path.clone());

    sink.append(json!({ "count": 1 })).await.unwrap();
    sink.append(json!({ "status": "failed", "error": "boom" }))
        .await
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(first["count"], 1);
    assert_eq!(second["status"], "failed");
}

#[tokio::test]
async fn append_creates_missing_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("out").join("dataset.jsonl");
    let sink = JsonlSink::new(path.clone());

    sink.append(json!({ "count": 0 })).await.unwrap();

    assert!(path.exists());
}
