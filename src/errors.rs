use serde::Serialize;
use thiserror::Error;

use crate::utils::tts::TtsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Tts(#[from] TtsError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Error category a UI layer can localize on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    EmptyText,
    RateLimitExceeded,
    PermissionDenied,
    Provider,
    NoAudioData,
    InvalidResponse,
    Network,
    FileNotFound,
    Playback,
    Io,
}

/// Structured failure returned by every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CommandError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<TtsError> for CommandError {
    fn from(err: TtsError) -> Self {
        let kind = match &err {
            TtsError::Configuration(_) => ErrorKind::Configuration,
            TtsError::EmptyText => ErrorKind::EmptyText,
            TtsError::RateLimitExceeded { .. } => ErrorKind::RateLimitExceeded,
            TtsError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            TtsError::Provider { .. } => ErrorKind::Provider,
            TtsError::NoAudioData => ErrorKind::NoAudioData,
            TtsError::InvalidResponse(_) => ErrorKind::InvalidResponse,
            TtsError::Http(_) => ErrorKind::Network,
            TtsError::FileNotFound(_) => ErrorKind::FileNotFound,
            TtsError::Playback(_) => ErrorKind::Playback,
            TtsError::Io(_) => ErrorKind::Io,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<AppError> for CommandError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Tts(e) => e.into(),
            AppError::ConfigurationError(message) => Self::new(ErrorKind::Configuration, message),
            AppError::IoError(e) => Self::new(ErrorKind::Io, e.to_string()),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, err.to_string())
    }
}
