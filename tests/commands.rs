use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use mockito::Matcher;
use serde_json::json;
use tempfile::TempDir;
use vietvoice::commands;
use vietvoice::config::AppPaths;
use vietvoice::utils::tts::{RateLimiter, SynthesisRequest, TtsConfig};
use vietvoice::{AppState, ErrorKind};

fn state(dir: &TempDir, base_url: &str) -> AppState {
    let paths = AppPaths::new(dir.path().join("vietvoice"));
    let config = TtsConfig {
        base_url: base_url.to_string(),
        ..paths.tts_config()
    };
    AppState::with_config(paths, config, Arc::new(RateLimiter::new(Duration::from_millis(5))))
}

#[tokio::test]
async fn test_api_key_round_trip() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir, "http://127.0.0.1:9");

    assert!(commands::set_api_key(&state, "AIza-stored".to_string()).await.unwrap());
    assert_eq!(commands::get_api_key(&state).await.unwrap(), "AIza-stored");
    assert!(dir.path().join("vietvoice").join("settings.json").exists());
}

#[tokio::test]
async fn test_generate_without_key() {
    if std::env::var("GEMINI_API_KEY").is_ok_and(|k| !k.trim().is_empty()) {
        // ключ из окружения подставился бы автоматически
        return;
    }
    let dir = TempDir::new().unwrap();
    let state = state(&dir, "http://127.0.0.1:9");

    let err = commands::generate_speech(&state, SynthesisRequest::new("Xin chào", "kore", "bac"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[tokio::test]
async fn test_generate_and_save() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.+:generateContent".to_string()))
        .match_query(Matcher::UrlEncoded("key".into(), "stored-key".into()))
        .with_status(200)
        .with_body(
            json!({"candidates": [{"content": {"parts": [{"inlineData": {
                "mimeType": "audio/L16;rate=24000",
                "data": BASE64.encode([0u8; 4])
            }}]}}]})
            .to_string(),
        )
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let state = state(&dir, &server.url());
    commands::set_api_key(&state, "stored-key".to_string()).await.unwrap();

    let request = SynthesisRequest::new("Xin chào", "achird", "can-tho");
    let result = commands::generate_speech(&state, request).await.unwrap();
    assert!(result.audio_path.starts_with(state.paths().output_dir()));
    assert_eq!(result.duration, 1.0);
    mock.assert_async().await;

    let audio_path = result.audio_path.to_string_lossy().into_owned();

    let canceled = commands::save_audio(audio_path.clone(), None).await.unwrap();
    assert!(canceled.canceled);
    assert_eq!(canceled.saved_path, None);

    let exports = dir.path().join("exports");
    std::fs::create_dir(&exports).unwrap();
    let saved = commands::save_audio(audio_path, Some(exports.to_string_lossy().into_owned()))
        .await
        .unwrap();
    assert!(!saved.canceled);
    let saved_path = saved.saved_path.unwrap();
    assert_eq!(saved_path, exports.join("tts-audio.wav"));
    assert_eq!(std::fs::metadata(saved_path).unwrap().len(), 48);
}

#[tokio::test]
async fn test_provider_failure_kind() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", Matcher::Regex(r"^/v1beta/models/.+:generateContent".to_string()))
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let state = state(&dir, &server.url());
    commands::set_api_key(&state, "stored-key".to_string()).await.unwrap();

    let err = commands::generate_speech(&state, SynthesisRequest::new("Xin chào", "kore", "bac"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Provider);
    assert!(err.message.contains("500"));
}

#[tokio::test]
async fn test_save_missing_source() {
    let dir = TempDir::new().unwrap();
    let err = commands::save_audio(
        dir.path().join("missing.wav").to_string_lossy().into_owned(),
        Some(dir.path().join("out.wav").to_string_lossy().into_owned()),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::FileNotFound);
}

#[tokio::test]
async fn test_save_onto_generated_file_keeps_audio() {
    let dir = TempDir::new().unwrap();
    let audio = dir.path().join("tts_1.wav");
    std::fs::write(&audio, [1u8; 48]).unwrap();
    let audio_path = audio.to_string_lossy().into_owned();

    let saved = commands::save_audio(audio_path.clone(), Some(audio_path))
        .await
        .unwrap();
    assert_eq!(saved.saved_path.as_deref(), Some(audio.as_path()));
    assert_eq!(std::fs::metadata(&audio).unwrap().len(), 48);
}

#[tokio::test]
async fn test_play_missing_file() {
    let err = commands::play_audio("/definitely/not/here.wav".to_string()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::FileNotFound);
}

#[tokio::test]
async fn test_output_dir_is_created() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir, "http://127.0.0.1:9");

    let output_dir = commands::get_output_dir(&state).await.unwrap();
    assert!(std::path::Path::new(&output_dir).is_dir());
    assert!(output_dir.ends_with("output"));
}

#[test]
fn test_catalog_listings() {
    let voices = commands::list_voices();
    assert_eq!(voices.len(), 30);
    assert!(voices.iter().any(|v| v.id == "sulafat" && v.display_name == "Sulafat"));

    let accents = commands::list_accents();
    assert_eq!(accents.len(), 11);
    assert_eq!(accents[0].id, "bac");

    let json = serde_json::to_value(&voices[0]).unwrap();
    assert_eq!(json["displayName"], "Zephyr");
}
