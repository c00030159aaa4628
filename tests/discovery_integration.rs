use echo360_downloader::parser::models::StreamKind;
use echo360_downloader::parser::public_parser::{
    classify_stream, is_media_stream_url, select_best_variants,
};
use echo360_downloader::session::logs::{LogEntry, resource_url, resource_urls};

fn devtools_entry(method: &str, params: serde_json::Value) -> LogEntry {
    LogEntry {
        message: serde_json::json!({
            "message": { "method": method, "params": params }
        })
        .to_string(),
    }
}

#[test]
fn response_received_yields_url() {
    let entry = devtools_entry(
        "Network.responseReceived",
        serde_json::json!({ "response": { "url": "https://content.echo360.org/a/s1q1.m4s" } }),
    );
    assert_eq!(
        resource_url(&entry.message).as_deref(),
        Some("https://content.echo360.org/a/s1q1.m4s")
    );
}

#[test]
fn request_will_be_sent_yields_url() {
    let entry = devtools_entry(
        "Network.requestWillBeSent",
        serde_json::json!({ "request": { "url": "https://content.echo360.org/a/s0q0.m4s" } }),
    );
    assert_eq!(
        resource_url(&entry.message).as_deref(),
        Some("https://content.echo360.org/a/s0q0.m4s")
    );
}

#[test]
fn non_network_events_are_ignored() {
    let entries = vec![
        devtools_entry("Page.loadEventFired", serde_json::json!({ "timestamp": 1.0 })),
        LogEntry {
            message: "not even json".to_string(),
        },
        devtools_entry(
            "Network.responseReceived",
            serde_json::json!({ "response": { "url": "https://echo360.org/app.js" } }),
        ),
    ];
    assert_eq!(resource_urls(&entries), vec!["https://echo360.org/app.js"]);
}

#[test]
fn media_pattern_keeps_stream_urls_only() {
    assert!(is_media_stream_url("https://content.echo360.org/a/s1q1.m4s"));
    assert!(is_media_stream_url(
        "https://content.echo360.org/a/hd1.mp4?Expires=123&Signature=abc"
    ));
    assert!(is_media_stream_url("https://content.echo360.org/a/index.m3u8"));
    assert!(is_media_stream_url("https://content.echo360.org/a/s0q0.m4a"));

    assert!(!is_media_stream_url("https://echo360.org/app.js"));
    assert!(!is_media_stream_url("https://echo360.org/poster.png"));
    assert!(!is_media_stream_url("https://echo360.org/media/page/public"));
    assert!(!is_media_stream_url("not a url at all"));
}

#[test]
fn highest_quality_variant_wins_per_track() {
    let urls = vec![
        "https://content.echo360.org/a/s1q0.m4s".to_string(),
        "https://content.echo360.org/a/s0q0.m4s".to_string(),
        "https://content.echo360.org/a/s1q1.m4s".to_string(),
        "https://content.echo360.org/a/s1q1.m4s".to_string(),
    ];
    assert_eq!(
        select_best_variants(&urls),
        vec![
            "https://content.echo360.org/a/s0q0.m4s".to_string(),
            "https://content.echo360.org/a/s1q1.m4s".to_string(),
        ]
    );
}

#[test]
fn unrecognized_urls_pass_through_deduplicated() {
    let urls = vec![
        "https://content.echo360.org/a/full.mp4".to_string(),
        "https://content.echo360.org/a/full.mp4".to_string(),
    ];
    assert_eq!(
        select_best_variants(&urls),
        vec!["https://content.echo360.org/a/full.mp4".to_string()]
    );
}

#[test]
fn stream_kinds_follow_track_naming() {
    assert_eq!(
        classify_stream("https://content.echo360.org/a/s0q0.m4s"),
        StreamKind::Audio
    );
    assert_eq!(
        classify_stream("https://content.echo360.org/a/s2q1.m4s"),
        StreamKind::Screen
    );
    assert_eq!(
        classify_stream("https://content.echo360.org/a/s1q1.m4s"),
        StreamKind::Video
    );
    assert_eq!(
        classify_stream("https://content.echo360.org/a/track.m4a"),
        StreamKind::Audio
    );
    assert_eq!(
        classify_stream("https://content.echo360.org/a/full.mp4"),
        StreamKind::Video
    );
}
