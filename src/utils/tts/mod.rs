//! # TTS (Text-to-Speech) модуль
//!
//! Генерация вьетнамской речи через Gemini TTS: каталог голосов и
//! региональных акцентов, ограничение частоты запросов, упаковка PCM в WAV
//! и воспроизведение готовых файлов.

pub mod types;
pub mod voices;
pub mod audio_format;
pub mod rate_limiter;
pub mod gemini_tts;
pub mod playback;

// Публично экспортируем основные типы и API для удобства использования
pub use types::{TtsError, Result, SynthesisRequest, SynthesisResult, TtsConfig};
pub use audio_format::{AudioFormat, encode_wav};
pub use rate_limiter::RateLimiter;
pub use gemini_tts::{
    ApiResponse, GeminiHttpApi, GeminiTtsClient, GenerateContentRequest, SpeechApi,
};
pub use playback::{AudioPlayer, Platform, PlayerCommand};
