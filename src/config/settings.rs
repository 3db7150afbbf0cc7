use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Environment variable consulted when no key is stored.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// Пользовательские настройки: вся схема файла settings.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// JSON-backed settings with an in-memory cache.
///
/// The cache is keyed on the file's modification time, so edits made to
/// `settings.json` outside the process are picked up on the next read.
pub struct SettingsStore {
    path: PathBuf,
    cache: Mutex<Option<CachedSettings>>,
}

struct CachedSettings {
    settings: Settings,
    modified: Option<SystemTime>,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Загрузка настроек: отсутствующий или повреждённый файл даёт пустые настройки
    pub fn load(&self) -> AppResult<Settings> {
        let mut cache = self.cache.lock().map_err(|e| {
            AppError::ConfigurationError(format!("Failed to acquire lock for settings: {}", e))
        })?;

        let modified = modified_time(&self.path);
        if let Some(cached) = cache.as_ref().filter(|c| c.modified == modified) {
            return Ok(cached.settings.clone());
        }

        let settings = read_settings(&self.path);
        *cache = Some(CachedSettings {
            settings: settings.clone(),
            modified,
        });
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> AppResult<()> {
        let mut cache = self.cache.lock().map_err(|e| {
            AppError::ConfigurationError(format!("Failed to acquire lock for settings: {}", e))
        })?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|e| {
            AppError::ConfigurationError(format!("Failed to serialize settings: {}", e))
        })?;
        std::fs::write(&self.path, json)?;
        info!("Settings saved to: {}", self.path.display());

        *cache = Some(CachedSettings {
            settings: settings.clone(),
            modified: modified_time(&self.path),
        });
        Ok(())
    }

    pub fn set_api_key(&self, key: &str) -> AppResult<()> {
        let mut settings = self.load()?;
        settings.api_key = Some(key.trim().to_string());
        self.save(&settings)
    }

    /// Stored key first, then `GEMINI_API_KEY`.
    pub fn resolve_api_key(&self) -> AppResult<Option<String>> {
        let stored = self.load()?.api_key;
        Ok(resolve_api_key(stored, std::env::var(API_KEY_ENV).ok()))
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn read_settings(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to parse settings {}: {}", path.display(), e);
                Settings::default()
            }
        },
        Err(e) => {
            error!("Failed to load settings {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

/// Picks the first non-blank candidate: stored key, then environment.
pub fn resolve_api_key(stored: Option<String>, env: Option<String>) -> Option<String> {
    [stored, env]
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_empty_settings() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(&path);
        assert_eq!(store.load().unwrap().api_key, None);
    }

    #[test]
    fn test_set_api_key_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        SettingsStore::new(&path).set_api_key(" AIza-test ").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(raw, serde_json::json!({ "apiKey": "AIza-test" }));

        // Новый экземпляр читает сохранённое значение с диска
        let reopened = SettingsStore::new(&path);
        assert_eq!(reopened.load().unwrap().api_key.as_deref(), Some("AIza-test"));
    }

    #[test]
    fn test_external_edit_is_picked_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(&path);
        store.set_api_key("first").unwrap();
        assert_eq!(store.load().unwrap().api_key.as_deref(), Some("first"));

        // Правка файла другим процессом; mtime сдвигаем явно
        std::fs::write(&path, r#"{ "apiKey": "second" }"#).unwrap();
        let later = SystemTime::now() + std::time::Duration::from_secs(10);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        assert_eq!(store.load().unwrap().api_key.as_deref(), Some("second"));
        assert_eq!(store.resolve_api_key().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_resolution_order() {
        let stored = Some("stored".to_string());
        let env = Some("from-env".to_string());

        assert_eq!(
            resolve_api_key(stored.clone(), env.clone()).as_deref(),
            Some("stored")
        );
        assert_eq!(
            resolve_api_key(None, env.clone()).as_deref(),
            Some("from-env")
        );
        assert_eq!(
            resolve_api_key(Some("  ".to_string()), env).as_deref(),
            Some("from-env")
        );
        assert_eq!(resolve_api_key(None, Some(String::new())), None);
        assert_eq!(resolve_api_key(None, None), None);
    }
}
