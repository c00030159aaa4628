use std::path::PathBuf;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use echo360_downloader::common::client::EchoClient;
use echo360_downloader::downloader::engine::DownloadEngine;
use echo360_downloader::downloader::error::DownloadError;
use echo360_downloader::downloader::LectureDownloader;
use echo360_downloader::parser::models::{LectureManifest, StreamKind, StreamSource};

/// Serve exactly one HTTP response on a loopback port and return the URL.
/// `announced_len` lets a test lie about the content length.
async fn serve_once(status_line: &'static str, body: Vec<u8>, announced_len: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;

        let header = format!(
            "{}\r\nContent-Type: video/mp4\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status_line, announced_len
        );
        socket.write_all(header.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}/stream/s1q1.mp4", addr)
}

fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("echodl_{}_{}", tag, uuid::Uuid::new_v4()))
}

fn engine() -> DownloadEngine {
    DownloadEngine::new(EchoClient::new().unwrap())
}

#[tokio::test]
async fn download_writes_all_bytes_and_creates_directories() {
    let body: Vec<u8> = (0..64 * 1024).map(|i| (i % 256) as u8).collect();
    let url = serve_once("HTTP/1.1 200 OK", body.clone(), body.len()).await;

    let dir = scratch_dir("ok");
    let dest = dir.join("nested").join("lecture_video.mp4");
    assert!(!dir.exists());

    let written = engine().download_to(&url, &dest).await.unwrap();
    assert_eq!(written, body.len() as u64);
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), body);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn short_body_is_an_error() {
    // Announce more bytes than are sent; the transfer must not pass as
    // complete, whether the mismatch is caught in-flight or at the end.
    let body = vec![0u8; 1024];
    let url = serve_once("HTTP/1.1 200 OK", body.clone(), body.len() + 512).await;

    let dir = scratch_dir("short");
    let result = engine().download_to(&url, &dir.join("lecture_video.mp4")).await;

    match result {
        Err(DownloadError::LengthMismatch { expected, written, .. }) => {
            assert_eq!(expected, (body.len() + 512) as u64);
            assert_eq!(written, body.len() as u64);
        }
        Err(DownloadError::Stream(_)) => {}
        other => panic!("expected a failed transfer, got {:?}", other.map(|_| ())),
    }

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn forbidden_status_maps_to_access_denied() {
    let url = serve_once("HTTP/1.1 403 Forbidden", Vec::new(), 0).await;

    let dir = scratch_dir("forbidden");
    let result = engine().download_to(&url, &dir.join("lecture_video.mp4")).await;
    assert!(matches!(
        result,
        Err(DownloadError::AccessDenied { status: 403, .. })
    ));

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn not_found_status_maps_to_bad_status() {
    let url = serve_once("HTTP/1.1 404 Not Found", Vec::new(), 0).await;

    let dir = scratch_dir("notfound");
    let result = engine().download_to(&url, &dir.join("lecture_video.mp4")).await;
    assert!(matches!(
        result,
        Err(DownloadError::BadStatus { status: 404, .. })
    ));

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn downloader_names_files_from_the_manifest() {
    let body = vec![7u8; 2048];
    let url = serve_once("HTTP/1.1 200 OK", body.clone(), body.len()).await;

    let manifest = LectureManifest {
        media_id: "22222222-2222-2222-2222-222222222222".to_string(),
        title: "Week 1: Introduction".to_string(),
        captured_at: None,
        streams: vec![StreamSource {
            kind: StreamKind::Video,
            url,
        }],
    };

    let dir = scratch_dir("manifest");
    let downloader = LectureDownloader::new(EchoClient::new().unwrap(), &dir, false);
    downloader.download_one(&manifest).await.unwrap();

    let expected = dir.join("Week_1_Introduction_video.mp4");
    assert_eq!(
        tokio::fs::read(&expected).await.unwrap().len(),
        body.len()
    );

    let _ = tokio::fs::remove_dir_all(&dir).await;
}
