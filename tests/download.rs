mod common;

use std::fs;
use reqwest::Client;
use tempfile::TempDir;
use tflite_export::export::{fetch_weights, ExportError};

use common::serve_once;

fn client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_fetch_writes_weights() {
    let body: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
    let url = serve_once("200 OK", body.clone()).await;
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("models/yolo11n.pt");

    let written = fetch_weights(&client(), &url, &target).await.unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(fs::read(&target).unwrap(), body);
    assert!(!tmp.path().join("models/yolo11n.part").exists());
}

#[tokio::test]
async fn test_fetch_rejects_error_status() {
    let url = serve_once("404 Not Found", b"missing".to_vec()).await;
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("yolo11n.pt");

    let err = fetch_weights(&client(), &url, &target).await.unwrap_err();

    match &err {
        ExportError::Download { url: failed, detail } => {
            assert_eq!(failed, &url);
            assert!(detail.contains("404"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!target.exists());
}

#[tokio::test]
async fn test_failed_finalize_removes_partial_file() {
    let url = serve_once("200 OK", b"weights".to_vec()).await;
    let tmp = TempDir::new().unwrap();
    // A non-empty directory at the target path makes the final rename fail
    let target = tmp.path().join("yolo11n.pt");
    fs::create_dir_all(target.join("occupied")).unwrap();

    let err = fetch_weights(&client(), &url, &target).await.unwrap_err();

    match &err {
        ExportError::Download { detail, .. } => assert!(detail.contains("cannot finalize")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!tmp.path().join("yolo11n.part").exists());
    assert!(target.is_dir());
}
