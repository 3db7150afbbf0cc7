//! # Gemini TTS Integration
//!
//! Клиент для генерации речи через Gemini generate-content API.
//! Отвечает за построение промпта с региональным акцентом, соблюдение
//! ограничения частоты запросов, повторные попытки при ответе 429,
//! извлечение base64 аудио из ответа и сохранение результата в WAV.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::utils::tts::audio_format::{self, DEFAULT_MIME_TYPE};
use crate::utils::tts::rate_limiter::RateLimiter;
use crate::utils::tts::types::{Result, SynthesisRequest, SynthesisResult, TtsConfig, TtsError};
use crate::utils::tts::voices;

/// Value shipped in sample `.env` files; treated the same as a missing key.
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

const TONE_INSTRUCTION: &str = "Read aloud in a warm and friendly tone:";

/// Characters per second used for the duration estimate.
const CHARS_PER_SECOND: f64 = 15.0;

// Формат запроса и ответа generate-content

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextPart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub response_modalities: Vec<String>,
    pub speech_config: SpeechConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

impl GenerateContentRequest {
    /// Audio-only request for `prompt` spoken by the prebuilt voice `voice_name`.
    pub fn speech(prompt: String, voice_name: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 1.0,
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice_name.to_string(),
                        },
                    },
                },
            },
        }
    }

    pub fn voice_name(&self) -> &str {
        &self.generation_config.speech_config.voice_config.prebuilt_voice_config.voice_name
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: Option<String>,
}

/// Status and body of one provider exchange, before interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// One round-trip to the generate-content endpoint.
#[async_trait::async_trait]
pub trait SpeechApi: Send + Sync {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<ApiResponse>;
}

/// reqwest-backed transport for the public Gemini endpoint.
pub struct GeminiHttpApi {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiHttpApi {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &TtsConfig) -> Self {
        Self::new(config.base_url.clone(), config.model.clone())
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait::async_trait]
impl SpeechApi for GeminiHttpApi {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<ApiResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

/// Синтезирует речь и сохраняет её в WAV-файлы в каталоге вывода.
pub struct GeminiTtsClient {
    api: Arc<dyn SpeechApi>,
    api_key: Option<String>,
    rate_limiter: Arc<RateLimiter>,
    config: TtsConfig,
}

impl GeminiTtsClient {
    /// Client talking to the real endpoint and sharing the global rate limiter.
    pub fn new(api_key: Option<String>, config: TtsConfig) -> Self {
        let api = Arc::new(GeminiHttpApi::from_config(&config));
        Self::with_api(api, api_key, RateLimiter::global(), config)
    }

    pub fn with_api(
        api: Arc<dyn SpeechApi>,
        api_key: Option<String>,
        rate_limiter: Arc<RateLimiter>,
        config: TtsConfig,
    ) -> Self {
        Self {
            api,
            api_key,
            rate_limiter,
            config,
        }
    }

    /// Generates speech for `request` and writes it to a new WAV file.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult> {
        let api_key = self.valid_api_key()?;

        if request.text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        let body = build_request(request);
        info!(
            "Generating speech: voice={}, accent={}, text_length={}",
            body.voice_name(),
            request.accent_id,
            request.text.chars().count()
        );

        let response = self.send_with_retry(api_key, &body).await?;
        let (mime_type, pcm) = extract_audio(&response.body)?;
        let wav = audio_format::pcm_to_wav(&pcm, &mime_type);

        let audio_path = self.write_output(&wav).await?;
        info!("Audio saved: {} ({} bytes)", audio_path.display(), wav.len());

        Ok(SynthesisResult {
            audio_path,
            duration: estimate_duration(&request.text),
        })
    }

    fn valid_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            None | Some("") => Err(TtsError::Configuration(
                "GEMINI_API_KEY is not set".to_string(),
            )),
            Some(PLACEHOLDER_API_KEY) => Err(TtsError::Configuration(
                "GEMINI_API_KEY still holds the placeholder value".to_string(),
            )),
            Some(key) => Ok(key),
        }
    }

    async fn send_with_retry(
        &self,
        api_key: &str,
        body: &GenerateContentRequest,
    ) -> Result<ApiResponse> {
        let max_attempts = self.config.max_attempts;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = self.config.retry_delay(attempt);
                warn!("Retry {}/{}: waiting {}ms...", attempt + 1, max_attempts, delay.as_millis());
                tokio::time::sleep(delay).await;
            }

            self.rate_limiter.acquire().await;
            info!("Calling TTS API (attempt {}/{})", attempt + 1, max_attempts);

            let response = self.api.generate_content(api_key, body).await?;
            match response.status {
                429 => {
                    warn!(
                        "TTS API rate limited the request (attempt {}/{})",
                        attempt + 1,
                        max_attempts
                    );
                    continue;
                }
                403 => {
                    error!("TTS API denied access: {}", response.body);
                    return Err(TtsError::PermissionDenied(response.body));
                }
                status if !(200..300).contains(&status) => {
                    error!("TTS API error ({}): {}", status, response.body);
                    return Err(TtsError::Provider {
                        status,
                        body: response.body,
                    });
                }
                _ => return Ok(response),
            }
        }

        Err(TtsError::RateLimitExceeded {
            attempts: max_attempts,
        })
    }

    async fn write_output(&self, wav: &[u8]) -> Result<PathBuf> {
        let output_dir = &self.config.output_dir;
        tokio::fs::create_dir_all(output_dir).await?;

        let audio_path = output_file_path(output_dir, chrono::Utc::now().timestamp_millis());
        tokio::fs::write(&audio_path, wav).await?;
        Ok(audio_path)
    }
}

/// Builds the provider request, falling back to the default voice and accent for unknown ids.
pub fn build_request(request: &SynthesisRequest) -> GenerateContentRequest {
    let accent = voices::resolve_accent(&request.accent_id);
    let voice = voices::resolve_voice(&request.voice_id);
    GenerateContentRequest::speech(build_prompt(accent.prompt, &request.text), voice.display_name)
}

pub fn build_prompt(accent_prompt: &str, text: &str) -> String {
    format!("{TONE_INSTRUCTION}\n{accent_prompt}\n\n{text}")
}

/// Rough duration in seconds: 15 characters per second, never below one second.
pub fn estimate_duration(text: &str) -> f64 {
    (text.chars().count() as f64 / CHARS_PER_SECOND).max(1.0)
}

pub fn output_file_path(output_dir: &Path, unix_millis: i64) -> PathBuf {
    output_dir.join(format!("tts_{unix_millis}.wav"))
}

/// Returns the MIME type and decoded PCM of the first part carrying inline audio.
fn extract_audio(body: &str) -> Result<(String, Vec<u8>)> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| TtsError::InvalidResponse(e.to_string()))?;

    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .into_iter()
        .flat_map(|content| content.parts)
        .filter_map(|part| part.inline_data)
        .find(|inline| inline.data.as_deref().is_some_and(|d| !d.is_empty()))
        .ok_or(TtsError::NoAudioData)?;

    let mime_type = inline
        .mime_type
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
    let data = inline.data.unwrap_or_default();
    let pcm = BASE64
        .decode(data.trim())
        .map_err(|e| TtsError::InvalidResponse(format!("invalid base64 audio: {e}")))?;

    Ok((mime_type, pcm))
}
