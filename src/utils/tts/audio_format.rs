//! # Audio Format Handling
//!
//! Разбор MIME-типа аудио из ответа провайдера и упаковка сырых PCM
//! данных в контейнер RIFF/WAVE.
//!
//! Провайдер возвращает линейный PCM без заголовка, например
//! `audio/L16;rate=24000`. Чтобы файл можно было проиграть, перед данными
//! записывается канонический 44-байтный заголовок WAV.
//!
//! ## Ограничения
//!
//! `encode_wav` не проверяет параметры формата: нулевая частота
//! дискретизации или нестандартная разрядность записываются как есть и дают
//! формально корректный, но бессмысленный заголовок. Значения, не
//! помещающиеся в поле заголовка, усекаются до его ширины.

use serde::Serialize;

pub const WAV_HEADER_LEN: usize = 44;
pub const DEFAULT_MIME_TYPE: &str = "audio/L16;rate=24000";

/// Параметры PCM потока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 24000,
            bits_per_sample: 16,
        }
    }
}

impl AudioFormat {
    /// Parses format parameters out of a MIME type such as `audio/L16;rate=24000`.
    ///
    /// A subtype of the form `L<digits>` sets the bit depth, a `rate=<int>`
    /// parameter sets the sample rate. Both read the leading digits only, so
    /// `rate=48000abc` gives 48000. Anything else, including values without
    /// leading digits, leaves the defaults in place.
    pub fn from_mime(mime_type: &str) -> Self {
        let mut format = Self::default();
        let mut tokens = mime_type.split(';').map(str::trim);

        if let Some(subtype) = tokens.next().and_then(|t| t.split('/').nth(1)) {
            if let Some(bits) = subtype.strip_prefix('L').and_then(parse_leading_int::<u16>) {
                format.bits_per_sample = bits;
            }
        }

        for param in tokens {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            if key.trim() == "rate" {
                if let Some(rate) = parse_leading_int::<u32>(value.trim()) {
                    format.sample_rate = rate;
                }
            }
        }

        format
    }

    pub fn byte_rate(&self) -> u32 {
        let bits = u64::from(self.channels) * u64::from(self.bits_per_sample);
        (u64::from(self.sample_rate) * bits / 8) as u32
    }

    pub fn block_align(&self) -> u16 {
        (u32::from(self.channels) * u32::from(self.bits_per_sample) / 8) as u16
    }
}

/// Parses the run of ASCII digits at the start of `s`, e.g. `16` from `16be`.
fn parse_leading_int<T: std::str::FromStr>(s: &str) -> Option<T> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Builds the canonical 44-byte RIFF/WAVE header for `data_len` bytes of PCM.
pub fn wav_header(data_len: usize, format: &AudioFormat) -> [u8; WAV_HEADER_LEN] {
    let data_len = data_len as u32;
    let mut header = [0u8; WAV_HEADER_LEN];

    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&data_len.wrapping_add(36).to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes());
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());

    header
}

/// Кодирует сырые PCM байты в WAV: заголовок плюс данные без сжатия.
///
/// # Примеры
///
/// ```rust
/// use vietvoice::utils::tts::audio_format::{encode_wav, AudioFormat};
///
/// let wav = encode_wav(&[0, 0, 0, 0], &AudioFormat::from_mime("audio/L16;rate=24000"));
/// assert_eq!(wav.len(), 48);
/// assert_eq!(&wav[0..4], b"RIFF");
/// ```
pub fn encode_wav(pcm: &[u8], format: &AudioFormat) -> Vec<u8> {
    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    wav.extend_from_slice(&wav_header(pcm.len(), format));
    wav.extend_from_slice(pcm);
    wav
}

/// Converts a provider inline payload (MIME type + already decoded PCM) into WAV bytes.
pub fn pcm_to_wav(pcm: &[u8], mime_type: &str) -> Vec<u8> {
    encode_wav(pcm, &AudioFormat::from_mime(mime_type))
}
