//! # TTS Types
//!
//! Общие типы данных и определения ошибок для конвейера синтеза речи:
//! запрос, результат, конфигурация клиента и таксономия ошибок.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors raised by the synthesis pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("API key is not configured: {0}")]
    Configuration(String),

    #[error("Text to synthesize is empty")]
    EmptyText,

    #[error("Rate limit exceeded after {attempts} attempts, wait a minute and try again")]
    RateLimitExceeded { attempts: u32 },

    #[error("API key has no permission to use TTS: {0}")]
    PermissionDenied(String),

    #[error("Provider error ({status}): {body}")]
    Provider { status: u16, body: String },

    #[error("No audio data in response")]
    NoAudioData,

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Audio file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Тип Result для всего TTS конвейера
pub type Result<T> = std::result::Result<T, TtsError>;

/// A single synthesis job as submitted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Текст для озвучивания
    pub text: String,
    /// Идентификатор голоса из каталога (`sulafat`, `puck`, ...)
    #[serde(rename = "voice")]
    pub voice_id: String,
    /// Ключ региона (`bac`, `hue`, `sai-gon`, ...)
    #[serde(rename = "accent")]
    pub accent_id: String,
    /// Carried through from the UI, not sent to the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    /// Carried through from the UI, not sent to the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
}

impl SynthesisRequest {
    pub fn new(
        text: impl Into<String>,
        voice_id: impl Into<String>,
        accent_id: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            accent_id: accent_id.into(),
            speed: None,
            pitch: None,
        }
    }
}

/// Outcome of a successful synthesis. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResult {
    pub audio_path: PathBuf,
    /// Estimated duration in seconds, derived from the text length.
    pub duration: f64,
}

/// Конфигурация клиента Gemini TTS
#[derive(Clone, Debug)]
pub struct TtsConfig {
    /// Адрес API без завершающего слэша
    pub base_url: String,
    /// Модель генерации речи
    pub model: String,
    /// Каталог для сохранения сгенерированных WAV-файлов
    pub output_dir: PathBuf,
    /// Максимальное число попыток при ответе 429
    pub max_attempts: u32,
    /// Base of the linear backoff: attempt `n` waits `n * retry_base_delay`.
    pub retry_base_delay: Duration,
}

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(5000);

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            output_dir: std::env::temp_dir().join("vietvoice").join("output"),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

impl TtsConfig {
    /// Delay to wait before the attempt with zero-based index `attempt`.
    /// The first attempt never waits; the second waits `2 * base`, the third `3 * base`.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            Duration::ZERO
        } else {
            self.retry_base_delay * (attempt + 1)
        }
    }
}
