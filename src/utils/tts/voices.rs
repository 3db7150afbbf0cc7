//! Static voice and accent catalogs.
//!
//! Голоса соответствуют готовым голосам Gemini TTS, акценты задают
//! региональную манеру чтения через текстовую инструкцию в промпте.

use serde::Serialize;

pub const DEFAULT_VOICE_ID: &str = "sulafat";
pub const DEFAULT_ACCENT_ID: &str = "bac";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    pub timbre: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    Central,
    South,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccentProfile {
    pub id: &'static str,
    pub region: Region,
    pub prompt: &'static str,
}

const fn voice(id: &'static str, display_name: &'static str, timbre: &'static str) -> VoiceProfile {
    VoiceProfile { id, display_name, timbre }
}

const fn accent(id: &'static str, region: Region, prompt: &'static str) -> AccentProfile {
    AccentProfile { id, region, prompt }
}

pub static VOICES: [VoiceProfile; 30] = [
    voice("zephyr", "Zephyr", "Bright, Higher pitch"),
    voice("puck", "Puck", "Upbeat, Middle pitch"),
    voice("charon", "Charon", "Informative, Lower pitch"),
    voice("kore", "Kore", "Firm, Middle pitch"),
    voice("fenrir", "Fenrir", "Excitable, Lower middle pitch"),
    voice("leda", "Leda", "Youthful, Higher pitch"),
    voice("orus", "Orus", "Firm, Lower middle pitch"),
    voice("aoede", "Aoede", "Breezy, Middle pitch"),
    voice("callirrhoe", "Callirrhoe", "Easy-going, Middle pitch"),
    voice("autonoe", "Autonoe", "Bright, Middle pitch"),
    voice("enceladus", "Enceladus", "Breathy, Lower pitch"),
    voice("iapetus", "Iapetus", "Clear, Lower middle pitch"),
    voice("umbriel", "Umbriel", "Easy-going, Lower middle pitch"),
    voice("algieba", "Algieba", "Smooth, Lower pitch"),
    voice("despina", "Despina", "Smooth, Middle pitch"),
    voice("erinome", "Erinome", "Clear, Middle pitch"),
    voice("algenib", "Algenib", "Gravelly, Lower pitch"),
    voice("rasalgethi", "Rasalgethi", "Informative, Middle pitch"),
    voice("laomedeia", "Laomedeia", "Upbeat, Higher pitch"),
    voice("achernar", "Achernar", "Soft, Higher pitch"),
    voice("alnilam", "Alnilam", "Firm, Lower middle pitch"),
    voice("schedar", "Schedar", "Even, Lower middle pitch"),
    voice("gacrux", "Gacrux", "Mature, Middle pitch"),
    voice("pulcherrima", "Pulcherrima", "Forward, Middle pitch"),
    voice("achird", "Achird", "Friendly, Lower middle pitch"),
    voice("zubenelgenubi", "Zubenelgenubi", "Casual, Lower middle pitch"),
    voice("vindemiatrix", "Vindemiatrix", "Gentle, Middle pitch"),
    voice("sadachbia", "Sadachbia", "Lively, Lower pitch"),
    voice("sadaltager", "Sadaltager", "Knowledgeable, Middle pitch"),
    voice("sulafat", "Sulafat", "Warm, Middle pitch"),
];

pub static ACCENTS: [AccentProfile; 11] = [
    // Miền Bắc
    accent(
        "bac",
        Region::North,
        "Đọc bằng giọng Bắc chuẩn, rõ ràng, trong trẻo, nhấn nhá đúng dấu.",
    ),
    accent("ha-noi", Region::North, "Đọc bằng giọng Hà Nội thanh lịch, nhẹ nhàng, trong trẻo."),
    // Miền Trung
    accent(
        "hue",
        Region::Central,
        "Đọc bằng giọng Huế, nhẹ nhàng, chậm rãi, trầm ấm, ngọt ngào, đầy cảm xúc.",
    ),
    accent(
        "nghe-an",
        Region::Central,
        "Đọc bằng giọng Nghệ An - Hà Tĩnh, nặng, chậm, trầm, mộc mạc.",
    ),
    accent("quang-nam", Region::Central, "Đọc bằng giọng Quảng Nam, nặng, thô, chậm, rõ ràng."),
    accent("binh-dinh", Region::Central, "Đọc bằng giọng Bình Định, nặng, thẳng thắn, mạnh mẽ."),
    accent("da-nang", Region::Central, "Đọc bằng giọng Đà Nẵng, vừa phải, dễ nghe, hơi nhanh."),
    // Miền Nam
    accent(
        "nam",
        Region::South,
        "Đọc bằng giọng Nam bộ, tự nhiên, thân thiện, nhanh, hơi kéo dài.",
    ),
    accent(
        "sai-gon",
        Region::South,
        "Đọc bằng giọng Sài Gòn, trẻ trung, hiện đại, thân thiện, năng động.",
    ),
    accent(
        "mien-tay",
        Region::South,
        "Đọc bằng giọng miền Tây Nam Bộ, chậm rãi, hiền hòa, mộc mạc, dễ thương.",
    ),
    accent(
        "can-tho",
        Region::South,
        "Đọc bằng giọng Cần Thơ, nhẹ nhàng, thân thiện, kéo dài cuối câu.",
    ),
];

/// Looks up a voice by id.
pub fn find_voice(id: &str) -> Option<&'static VoiceProfile> {
    VOICES.iter().find(|v| v.id == id)
}

/// Looks up an accent by id.
pub fn find_accent(id: &str) -> Option<&'static AccentProfile> {
    ACCENTS.iter().find(|a| a.id == id)
}

/// Returns the voice for `id`, or the default voice when the id is unknown.
pub fn resolve_voice(id: &str) -> &'static VoiceProfile {
    find_voice(id).unwrap_or_else(default_voice)
}

/// Returns the accent for `id`, or the default accent when the id is unknown.
pub fn resolve_accent(id: &str) -> &'static AccentProfile {
    find_accent(id).unwrap_or_else(default_accent)
}

fn default_voice() -> &'static VoiceProfile {
    // sulafat is the last catalog entry
    &VOICES[VOICES.len() - 1]
}

fn default_accent() -> &'static AccentProfile {
    &ACCENTS[0]
}
