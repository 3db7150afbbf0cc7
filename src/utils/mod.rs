pub mod common;
pub mod logger;
pub mod tts;
