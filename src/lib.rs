//! Vietnamese text-to-speech with regional accents, backed by Gemini TTS.
//!
//! The pipeline lives in [`utils::tts`]; [`commands`] wraps it in the
//! operations a desktop frontend calls.

pub mod commands;
pub mod config;
pub mod errors;
pub mod utils;

pub use commands::AppState;
pub use errors::{AppError, AppResult, CommandError, ErrorKind};
