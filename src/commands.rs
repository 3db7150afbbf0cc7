//! Caller-facing operations consumed by the UI layer.
//!
//! Every command returns `Result<T, CommandError>` so the frontend can pick a
//! localized message by `kind`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{error, info};
use serde::Serialize;

use crate::config::{AppPaths, SettingsStore};
use crate::errors::{CommandError, ErrorKind};
use crate::utils::common::{check_file_exists_and_valid, copy_to_output_path};
use crate::utils::tts::voices::{self, AccentProfile, VoiceProfile};
use crate::utils::tts::{
    AudioPlayer, GeminiHttpApi, GeminiTtsClient, RateLimiter, SynthesisRequest, SynthesisResult,
    TtsConfig, TtsError,
};

/// Shared state behind the commands.
pub struct AppState {
    paths: AppPaths,
    settings: SettingsStore,
    rate_limiter: Arc<RateLimiter>,
    config: TtsConfig,
}

impl AppState {
    /// State rooted at `paths`, using the process-wide rate limiter.
    pub fn new(paths: AppPaths) -> Self {
        let config = paths.tts_config();
        Self::with_config(paths, config, RateLimiter::global())
    }

    pub fn with_config(paths: AppPaths, config: TtsConfig, rate_limiter: Arc<RateLimiter>) -> Self {
        let settings = SettingsStore::new(paths.settings_file());
        Self {
            paths,
            settings,
            rate_limiter,
            config,
        }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    fn client(&self, api_key: String) -> GeminiTtsClient {
        GeminiTtsClient::with_api(
            Arc::new(GeminiHttpApi::from_config(&self.config)),
            Some(api_key),
            Arc::clone(&self.rate_limiter),
            self.config.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_path: Option<PathBuf>,
    pub canceled: bool,
}

/// Returns the effective API key, or an empty string when none is configured.
pub async fn get_api_key(state: &AppState) -> Result<String, CommandError> {
    Ok(state.settings.resolve_api_key()?.unwrap_or_default())
}

pub async fn set_api_key(state: &AppState, key: String) -> Result<bool, CommandError> {
    state.settings.set_api_key(&key)?;
    Ok(true)
}

/// Synthesizes `options.text` and returns the generated file.
pub async fn generate_speech(
    state: &AppState,
    options: SynthesisRequest,
) -> Result<SynthesisResult, CommandError> {
    let Some(api_key) = state.settings.resolve_api_key()? else {
        return Err(CommandError::new(
            ErrorKind::Configuration,
            "API key is not configured. Add it in Settings.",
        ));
    };

    info!(
        "Generating TTS: voice={}, accent={}, speed={:?}, pitch={:?}",
        options.voice_id, options.accent_id, options.speed, options.pitch
    );

    state.client(api_key).synthesize(&options).await.map_err(|e| {
        error!("TTS generation error: {}", e);
        CommandError::from(e)
    })
}

pub async fn play_audio(audio_path: String) -> Result<(), CommandError> {
    AudioPlayer::new().play(Path::new(&audio_path)).await.map_err(|e| {
        error!("Play audio error: {}", e);
        CommandError::from(e)
    })
}

/// Copies a generated file to `destination`.
///
/// `None` means the user dismissed the save dialog.
pub async fn save_audio(
    audio_path: String,
    destination: Option<String>,
) -> Result<SaveOutcome, CommandError> {
    let Some(destination) = destination.filter(|d| !d.trim().is_empty()) else {
        return Ok(SaveOutcome {
            saved_path: None,
            canceled: true,
        });
    };

    let source = PathBuf::from(audio_path);
    if !check_file_exists_and_valid(&source).await {
        return Err(TtsError::FileNotFound(source).into());
    }

    let saved_path = copy_to_output_path(&source, Path::new(&destination)).await.map_err(|e| {
        error!("Save audio error: {}", e);
        CommandError::from(e)
    })?;
    info!("Audio saved to: {}", saved_path.display());

    Ok(SaveOutcome {
        saved_path: Some(saved_path),
        canceled: false,
    })
}

/// Returns the output directory, creating it if needed.
pub async fn get_output_dir(state: &AppState) -> Result<String, CommandError> {
    let output_dir = state.paths.output_dir();
    tokio::fs::create_dir_all(&output_dir).await?;
    Ok(output_dir.to_string_lossy().into_owned())
}

pub fn list_voices() -> Vec<VoiceProfile> {
    voices::VOICES.to_vec()
}

pub fn list_accents() -> Vec<AccentProfile> {
    voices::ACCENTS.to_vec()
}
