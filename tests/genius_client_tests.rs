// Tests for the Genius client and the shared JSON helper against a scripted transport

mod common;

use common::{genius_client, genius_config, search_url, FakeGenius, BASE_URL};
use geniuslyrics::constants::{BROWSER_USER_AGENT, COUNT_VIEW_USER_AGENT};
use geniuslyrics::helpers::genius::send_view_count;
use geniuslyrics::helpers::http_client::{get_json, HttpClientError};
use geniuslyrics::{GeniusConfig, LyricsDocument, LyricsError};
use serde_json::{json, Value};

const PAGE_URL: &str = "https://genius.test/Miia-dynasty-lyrics";
const COUNT_URL: &str = "https://genius.test/api/songs/378195/count_view";

const PAGE: &str = r#"<html><body><div id="lyrics-root">
<div data-lyrics-container="true">Dynasty Lyrics<br/>[Verse 1]<br/>I've been searching</div>
<div data-lyrics-container="true">[Chorus]<br/>All I gave you</div>
</div></body></html>"#;

fn search_body(result: Value) -> String {
    json!({
        "meta": {"status": 200},
        "response": {
            "sections": [
                {"type": "top_hit", "hits": []},
                {"type": "song", "hits": [{"type": "song", "result": result}]}
            ]
        }
    })
    .to_string()
}

fn dynasty() -> Value {
    json!({
        "artist_names": "MIIA",
        "title": "Dynasty",
        "url": PAGE_URL,
        "header_image_url": "https://images.genius.test/dynasty.jpg",
        "api_path": "/songs/378195"
    })
}

#[test]
fn test_get_json_parses_body() {
    let fake = FakeGenius::new().respond("http://test/json", r#"{"ok": true}"#.to_string());
    let value = get_json(&fake, "http://test/json", &[]).unwrap();
    assert_eq!(value["ok"], true);
}

#[test]
fn test_get_json_errors() {
    let fake = FakeGenius::new()
        .respond("http://test/empty", "  ".to_string())
        .respond("http://test/html", "<html></html>".to_string())
        .respond_status("http://test/down", 503);

    assert!(matches!(
        get_json(&fake, "http://test/empty", &[]),
        Err(HttpClientError::EmptyResponse)
    ));
    assert!(matches!(
        get_json(&fake, "http://test/html", &[]),
        Err(HttpClientError::ParseError(_))
    ));
    assert!(matches!(
        get_json(&fake, "http://test/down", &[]),
        Err(HttpClientError::StatusError { status: 503, .. })
    ));
}

#[test]
fn test_resolve_sends_browser_headers() {
    let fake = FakeGenius::new().respond(&search_url("Dynasty MIIA"), search_body(dynasty()));
    let client = genius_client(fake.clone(), genius_config());

    let resolved = client.resolve("Dynasty MIIA").unwrap();
    assert_eq!(resolved.page_url, PAGE_URL);
    assert_eq!(resolved.song.title.as_deref(), Some("Dynasty"));

    let requests = fake.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header("user-agent"), Some(BROWSER_USER_AGENT));
    assert_eq!(requests[0].header("accept"), Some("application/json, text/plain, */*"));
}

#[test]
fn test_resolve_without_song_sections() {
    let body = json!({"response": {"sections": [{"type": "artist", "hits": [{"type": "artist", "result": {}}]}]}});
    let fake = FakeGenius::new().respond(&search_url("Dynasty MIIA"), body.to_string());
    let client = genius_client(fake, genius_config());

    match client.resolve("Dynasty MIIA") {
        Err(LyricsError::SongNotFound { details }) => assert_eq!(details, body),
        other => panic!("expected SongNotFound, got {:?}", other),
    }
}

#[test]
fn test_resolve_without_url() {
    let mut result = dynasty();
    result["url"] = Value::Null;
    let fake = FakeGenius::new().respond(&search_url("Dynasty MIIA"), search_body(result));
    let client = genius_client(fake, genius_config());

    assert!(matches!(
        client.resolve("Dynasty MIIA"),
        Err(LyricsError::LyricsUrlUnavailable { .. })
    ));
}

#[test]
fn test_resolve_with_non_string_url() {
    let mut result = dynasty();
    result["url"] = json!({"path": "/Miia-dynasty-lyrics"});
    let fake = FakeGenius::new().respond(&search_url("Dynasty MIIA"), search_body(result));
    let client = genius_client(fake, genius_config());

    assert!(matches!(
        client.resolve("Dynasty MIIA"),
        Err(LyricsError::LyricsUrlUnavailable { .. })
    ));
}

#[test]
fn test_resolve_upstream_failures() {
    let fake = FakeGenius::new().respond_status(&search_url("Dynasty MIIA"), 403);
    let client = genius_client(fake, genius_config());
    assert!(matches!(
        client.resolve("Dynasty MIIA"),
        Err(LyricsError::Upstream(HttpClientError::StatusError { status: 403, .. }))
    ));

    let fake = FakeGenius::new().respond(&search_url("Dynasty MIIA"), r#"{"response": {"sections": 7}}"#.to_string());
    let client = genius_client(fake, genius_config());
    assert!(matches!(
        client.resolve("Dynasty MIIA"),
        Err(LyricsError::MalformedResponse(_))
    ));
}

#[test]
fn test_send_view_count_headers() {
    let fake = FakeGenius::new().respond(COUNT_URL, String::new());
    send_view_count(&fake, COUNT_URL, PAGE_URL).unwrap();

    let requests = fake.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, COUNT_URL);
    assert_eq!(requests[0].header("referer"), Some(PAGE_URL));
    assert_eq!(requests[0].header("user-agent"), Some(COUNT_VIEW_USER_AGENT));
}

#[test]
fn test_fetch_lyrics_ignores_view_count_failure() {
    let fake = FakeGenius::new()
        .respond(&search_url("Dynasty MIIA"), search_body(dynasty()))
        .fail(COUNT_URL, "connection reset")
        .respond(PAGE_URL, PAGE.to_string());
    let client = genius_client(fake.clone(), genius_config());

    let document = client.fetch_lyrics("Dynasty MIIA").unwrap();
    assert_eq!(
        document,
        LyricsDocument {
            title: Some("Dynasty".to_string()),
            artist: Some("MIIA".to_string()),
            link: PAGE_URL.to_string(),
            image: Some("https://images.genius.test/dynasty.jpg".to_string()),
            lyrics: "[Verse 1]\nI've been searching\n\n[Chorus]\nAll I gave you".to_string(),
        }
    );

    let count_view = fake
        .wait_for("POST", COUNT_URL)
        .expect("view count attempted despite the failure");
    assert_eq!(count_view.header("referer"), Some(PAGE_URL));
}

#[test]
fn test_fetch_lyrics_skips_view_count_when_disabled() {
    let fake = FakeGenius::new()
        .respond(&search_url("Dynasty MIIA"), search_body(dynasty()))
        .respond(PAGE_URL, PAGE.to_string());
    let config = GeniusConfig {
        count_views: false,
        ..genius_config()
    };
    let client = genius_client(fake.clone(), config);

    client.fetch_lyrics("Dynasty MIIA").unwrap();
    assert!(fake.requests().iter().all(|(method, _)| method == "GET"));
}

#[test]
fn test_fetch_lyrics_skips_view_count_without_song_id() {
    let mut result = dynasty();
    result["api_path"] = json!(378195);
    let fake = FakeGenius::new()
        .respond(&search_url("Dynasty MIIA"), search_body(result))
        .respond(PAGE_URL, PAGE.to_string());
    let client = genius_client(fake.clone(), genius_config());

    client.fetch_lyrics("Dynasty MIIA").unwrap();
    // The page fetch happens after the notifier would have been started
    assert!(fake.requests().iter().all(|(method, _)| method == "GET"));
    assert_eq!(fake.requests().len(), 2);
}

#[test]
fn test_fetch_lyrics_page_failure() {
    let fake = FakeGenius::new()
        .respond(&search_url("Dynasty MIIA"), search_body(dynasty()))
        .respond_status(PAGE_URL, 500);
    let client = genius_client(fake, genius_config());

    let error = client.fetch_lyrics("Dynasty MIIA").unwrap_err();
    assert!(matches!(
        error,
        LyricsError::Upstream(HttpClientError::StatusError { status: 500, .. })
    ));
    assert!(error.details().is_none());
}

#[test]
fn test_fetch_lyrics_rejects_empty_query() {
    let fake = FakeGenius::new();
    let client = genius_client(fake.clone(), genius_config());
    assert!(matches!(client.fetch_lyrics(""), Err(LyricsError::MissingQuery)));
    assert!(fake.requests().is_empty());
}

#[test]
fn test_urls_follow_base_url() {
    let client = genius_client(FakeGenius::new(), genius_config());
    assert_eq!(client.search_url("Dynasty MIIA"), search_url("Dynasty MIIA"));
    assert_eq!(client.count_view_url("378195"), format!("{}/api/songs/378195/count_view", BASE_URL));
}
