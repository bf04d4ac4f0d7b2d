// End-to-end tests: a real server on an ephemeral port, driven with reqwest.

use base64::Engine as _;
use mindecho::engine::state::AppState;
use mindecho::{build_router, ServerConfig, StorageKind};
use mindecho_core::sentiment::CRISIS_RESPONSE;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn spawn_with(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn(config: ServerConfig) -> String {
    spawn_with(AppState::from_config(config).unwrap()).await
}

fn seeded(seed: u64) -> ServerConfig {
    ServerConfig {
        response_seed: Some(seed),
        ..ServerConfig::default()
    }
}

async fn post_json(base: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap_or(Value::Null))
}

async fn get_json(base: &str, path: &str) -> (StatusCode, Value) {
    let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap_or(Value::Null))
}

fn png_data_url(rgba: [u8; 4]) -> String {
    let img = image::RgbaImage::from_pixel(16, 16, image::Rgba(rgba));
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes.into_inner())
    )
}

// ── Chat ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_rejects_empty_message() {
    let base = spawn(seeded(1)).await;
    let (status, body) = post_json(&base, "/api/chat", json!({"message": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");

    let (status, _) = post_json(&base, "/api/chat", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_replies_as_assistant() {
    let base = spawn(seeded(2)).await;
    let (status, body) = post_json(
        &base,
        "/api/chat",
        json!({"message": "I feel like nothing is going right in my life", "history": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "assistant");
    assert!(!body["content"].as_str().unwrap().is_empty());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn odd_history_entries_still_get_a_reply() {
    let base = spawn(seeded(13)).await;
    let (status, body) = post_json(
        &base,
        "/api/chat",
        json!({
            "message": "I feel sad",
            "history": [
                {"role": "bot", "content": "hi"},
                {"role": "user", "content": "work again", "timestamp": 1700000000},
                {"content": "no role"}
            ],
            "emotionData": {"voice": "garbled"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "assistant");
    assert!(!body["content"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn crisis_message_gets_the_safety_reply() {
    let base = spawn(seeded(3)).await;
    let (status, body) = post_json(
        &base,
        "/api/chat",
        json!({
            "message": "Honestly I just want to die",
            "emotionData": {"video": {"dominantEmotion": "happy", "confidence": 78}}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], CRISIS_RESPONSE);
}

#[tokio::test]
async fn same_seed_gives_identical_replies() {
    let message = json!({"message": "work has been stressful and I can't sleep"});
    let a = spawn(seeded(7)).await;
    let b = spawn(seeded(7)).await;
    let (_, first) = post_json(&a, "/api/chat", message.clone()).await;
    let (_, second) = post_json(&b, "/api/chat", message).await;
    assert_eq!(first["content"], second["content"]);
}

// ── Mood log + wellness ────────────────────────────────────────────────

#[tokio::test]
async fn mood_log_flow() {
    let base = spawn(seeded(4)).await;

    let (status, body) = get_json(&base, "/api/wellness/score").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 50);
    assert_eq!(body["trend"], "stable");

    for (mood, intensity) in [("good", 4), ("great", 5), ("okay", 3)] {
        let (status, body) =
            post_json(&base, "/api/mood", json!({"mood": mood, "intensity": intensity})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["mood"], mood);
        assert!(body["id"].is_string());
    }

    let (_, all) = get_json(&base, "/api/mood").await;
    let moods: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["mood"].as_str().unwrap())
        .collect();
    assert_eq!(moods, ["good", "great", "okay"]);

    let (_, recent) = get_json(&base, "/api/mood/recent?limit=2").await;
    let recent: Vec<&str> = recent
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["mood"].as_str().unwrap())
        .collect();
    assert_eq!(recent, ["okay", "great"]);

    let (_, history) = get_json(&base, "/api/mood/history?days=1").await;
    assert_eq!(history.as_array().unwrap().len(), 3);

    let (_, score) = get_json(&base, "/api/wellness/score").await;
    assert_eq!(score["score"], 80);

    let (_, health) = get_json(&base, "/api/health").await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["moodEntries"], 3);
}

#[tokio::test]
async fn mood_validation_errors_are_400() {
    let base = spawn(seeded(5)).await;
    let (status, body) = post_json(&base, "/api/mood", json!({"mood": "fantastic"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("fantastic"));

    let (status, _) = post_json(&base, "/api/mood", json!({"mood": "good", "intensity": 9})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&base, "/api/mood/history?days=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn huge_history_window_returns_everything() {
    let base = spawn(seeded(11)).await;
    let (status, _) = post_json(&base, "/api/mood", json!({"mood": "sad"})).await;
    assert_eq!(status, StatusCode::CREATED);

    for days in ["1000000000", &i64::MAX.to_string()] {
        let (status, body) = get_json(&base, &format!("/api/mood/history?days={days}")).await;
        assert_eq!(status, StatusCode::OK, "days={days}");
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn sqlite_history_accepts_huge_window() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn(ServerConfig {
        storage: StorageKind::Sqlite,
        db_path: dir.path().join("mood.db"),
        ..seeded(12)
    })
    .await;
    post_json(&base, "/api/mood", json!({"mood": "okay"})).await;
    let (status, body) = get_json(&base, "/api/mood/history?days=1000000000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn sqlite_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        storage: StorageKind::Sqlite,
        db_path: dir.path().join("mood.db"),
        ..seeded(6)
    };

    let base = spawn(config.clone()).await;
    let (status, _) = post_json(&base, "/api/mood", json!({"mood": "calm", "note": "walk"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let reopened = spawn(config).await;
    let (_, all) = get_json(&reopened, "/api/mood").await;
    assert_eq!(all[0]["mood"], "calm");
    assert_eq!(all[0]["note"], "walk");
}

// ── Analysis ───────────────────────────────────────────────────────────

#[tokio::test]
async fn voice_requires_audio_field() {
    let base = spawn(seeded(8)).await;
    let form = Form::new().text("comment", "no audio here");
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/analyze/voice"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No audio file provided");
}

#[tokio::test]
async fn voice_sample_is_analyzed() {
    let base = spawn(seeded(9)).await;
    let samples: Vec<u8> = (0..8000u32).map(|i| if i % 2 == 0 { 200 } else { 56 }).collect();
    let form = Form::new().part(
        "audio",
        Part::bytes(samples).file_name("clip.webm").mime_str("audio/webm").unwrap(),
    );
    let resp = reqwest::Client::new()
        .post(format!("{base}/api/analyze/voice"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert!(body["emotion"].is_string());
    assert!(body["confidence"].as_u64().unwrap() <= 100);
    assert!(body["details"]["duration"].is_number());
}

#[tokio::test]
async fn image_endpoint_validates_and_degrades() {
    let base = spawn(seeded(10)).await;

    let (status, body) = post_json(&base, "/api/analyze/image", json!({"image": "hello"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid image data");

    let (status, body) = post_json(
        &base,
        "/api/analyze/image",
        json!({"image": png_data_url([150, 140, 120, 255])}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["dominantEmotion"].is_string());
    assert_eq!(body["details"]["brightness"].as_u64().map(|b| b > 100), Some(true));

    let (status, body) = post_json(
        &base,
        "/api/analyze/image",
        json!({"image": "data:image/png;base64,bm90IGEgcG5n"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence"], 40);
    assert_eq!(body["dominantEmotion"], "neutral");
}

// ── Utility ────────────────────────────────────────────────────────────

#[tokio::test]
async fn helplines_are_listed() {
    let base = spawn(ServerConfig::default()).await;
    let (status, body) = get_json(&base, "/api/emergency/helplines").await;
    assert_eq!(status, StatusCode::OK);
    let lines = body["helplines"].as_array().unwrap();
    assert!(lines.iter().any(|l| l["number"] == "988"));
}
