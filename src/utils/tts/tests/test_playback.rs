//! Тесты выбора плеера и воспроизведения

use std::ffi::OsString;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::utils::tts::playback::{AudioPlayer, Platform, PlayerCommand};
use crate::utils::tts::types::TtsError;

#[test]
fn test_platform_commands() {
    let mac = Platform::MacOS.player_commands();
    assert_eq!(mac, vec![PlayerCommand::new("afplay", &[])]);

    let windows = Platform::Windows.player_commands();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].program, "cmd");

    let other: Vec<_> = Platform::Other.player_commands().into_iter().map(|c| c.program).collect();
    assert_eq!(other, vec!["aplay", "paplay"]);
}

#[test]
fn test_command_line_appends_path() {
    let path = Path::new("/tmp/tts_1.wav");

    let line = Platform::Windows.player_commands()[0].command_line(path);
    let expected: Vec<OsString> = ["cmd", "/C", "start", "", "/tmp/tts_1.wav"]
        .iter()
        .map(OsString::from)
        .collect();
    assert_eq!(line, expected);

    let line = PlayerCommand::new("afplay", &[]).command_line(path);
    assert_eq!(line, vec![OsString::from("afplay"), OsString::from("/tmp/tts_1.wav")]);
}

#[tokio::test]
async fn test_missing_file() {
    let player = AudioPlayer::with_commands(vec![PlayerCommand::new("true", &[])]);
    let err = player.play(Path::new("/definitely/not/here.wav")).await.unwrap_err();
    assert!(matches!(err, TtsError::FileNotFound(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_falls_through_to_next_player() {
    let file = NamedTempFile::new().unwrap();
    let player = AudioPlayer::with_commands(vec![
        PlayerCommand::new("vietvoice-missing-player", &[]),
        PlayerCommand::new("false", &[]),
        PlayerCommand::new("true", &[]),
    ]);

    player.play(file.path()).await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_all_players_fail() {
    let file = NamedTempFile::new().unwrap();
    let player = AudioPlayer::with_commands(vec![
        PlayerCommand::new("vietvoice-missing-player", &[]),
        PlayerCommand::new("false", &[]),
    ]);

    match player.play(file.path()).await {
        Err(TtsError::Playback(message)) => assert!(message.contains("false"), "{message}"),
        other => panic!("expected playback error, got {other:?}"),
    }
}
