//! Common file helpers used by the commands

use std::path::{Path, PathBuf};

use log::info;

/// Имя файла по умолчанию при сохранении в каталог
pub const DEFAULT_SAVE_NAME: &str = "tts-audio.wav";

/// Check if a file exists and has valid content (non-zero size)
pub async fn check_file_exists_and_valid(path: &Path) -> bool {
    if let Ok(metadata) = tokio::fs::metadata(path).await {
        if metadata.is_file() && metadata.len() > 0 {
            return true;
        }
    }
    false
}

/// Copies `source` to `destination`, creating parent directories as needed.
///
/// If `destination` is an existing directory the file is written there as
/// `tts-audio.wav`. Returns the path actually written. The source is read
/// fully before the target is opened, so `destination == source` is safe.
pub async fn copy_to_output_path(
    source: &Path,
    destination: &Path,
) -> std::io::Result<PathBuf> {
    let target = if tokio::fs::metadata(destination).await.is_ok_and(|m| m.is_dir()) {
        let target = destination.join(DEFAULT_SAVE_NAME);
        info!("Destination is a directory, copying to: {}", target.display());
        target
    } else {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        destination.to_path_buf()
    };

    // fs::copy обрезает цель до чтения источника
    let bytes = tokio::fs::read(source).await?;
    tokio::fs::write(&target, bytes).await?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_check_file_exists_and_valid() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.wav");
        let full = dir.path().join("full.wav");
        std::fs::write(&empty, b"").unwrap();
        std::fs::write(&full, b"RIFF").unwrap();

        assert!(!check_file_exists_and_valid(&empty).await);
        assert!(check_file_exists_and_valid(&full).await);
        assert!(!check_file_exists_and_valid(dir.path()).await);
        assert!(!check_file_exists_and_valid(&dir.path().join("missing.wav")).await);
    }

    #[tokio::test]
    async fn test_copy_into_directory_uses_default_name() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("tts_1.wav");
        std::fs::write(&source, b"RIFFdata").unwrap();
        let exports = dir.path().join("exports");
        std::fs::create_dir(&exports).unwrap();

        let written = copy_to_output_path(&source, &exports).await.unwrap();
        assert_eq!(written, exports.join(DEFAULT_SAVE_NAME));
        assert_eq!(std::fs::read(written).unwrap(), b"RIFFdata");
    }

    #[tokio::test]
    async fn test_copy_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("tts_1.wav");
        std::fs::write(&source, b"RIFF").unwrap();
        let target = dir.path().join("a").join("b").join("greeting.wav");

        let written = copy_to_output_path(&source, &target).await.unwrap();
        assert_eq!(written, target);
        assert!(target.exists());
    }

    #[tokio::test]
    async fn test_copy_onto_itself_keeps_content() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("tts_1.wav");
        std::fs::write(&source, [7u8; 48]).unwrap();

        let written = copy_to_output_path(&source, &source).await.unwrap();
        assert_eq!(written, source);
        assert_eq!(std::fs::read(&source).unwrap(), vec![7u8; 48]);
    }
}
