use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

const APP_SENTINEL: &str = "portal.news";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "_app")]
    pub app: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Category the portal opens on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Base URL of the news feed service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: APP_SENTINEL.to_string(),
            theme: None,
            category: None,
            language: None,
            endpoint: None,
            page_size: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.app != APP_SENTINEL {
            bail!(
                "Settings file appears to belong to another application (expected _app = '{}', found '{}')",
                APP_SENTINEL,
                self.app
            );
        }
        if self.page_size == Some(0) {
            bail!("page_size must be greater than zero");
        }
        Ok(())
    }
}

pub fn config_dir(custom: Option<&PathBuf>) -> Option<PathBuf> {
    custom
        .cloned()
        .or_else(|| dirs::home_dir().map(|p| p.join(".config").join("portal")))
}

pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join("settings.toml")
}

pub fn log_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_file_returns_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.app, "portal.news");
        assert!(settings.theme.is_none());
        assert!(settings.endpoint.is_none());
    }

    #[test]
    fn load_valid_settings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        fs::write(
            &path,
            "_app = \"portal.news\"\ncategory = \"science\"\nlanguage = \"de\"\nendpoint = \"http://localhost:9000/v1\"\npage_size = 30\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.category.as_deref(), Some("science"));
        assert_eq!(settings.language.as_deref(), Some("de"));
        assert_eq!(settings.endpoint.as_deref(), Some("http://localhost:9000/v1"));
        assert_eq!(settings.page_size, Some(30));
    }

    #[test]
    fn wrong_sentinel_returns_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        fs::write(&path, "_app = \"other-app\"\n").unwrap();

        let err = Settings::load(&path).unwrap_err().to_string();
        assert!(err.contains("another application"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");

        fs::write(&path, "_app = \"portal.news\"\npage_size = 0\n").unwrap();

        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("settings.toml");

        let saved = Settings {
            theme: Some("nord".to_string()),
            category: Some("world".to_string()),
            ..Default::default()
        };

        saved.save(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("_app = \"portal.news\""));
        assert!(!content.contains("endpoint"));

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.theme, saved.theme);
        assert_eq!(loaded.category, saved.category);
    }

    #[test]
    fn config_dir_uses_custom_when_provided() {
        let custom = PathBuf::from("/custom/path");
        assert_eq!(config_dir(Some(&custom)), Some(custom.clone()));
        assert_eq!(log_dir(&custom), PathBuf::from("/custom/path/logs"));
    }

    #[test]
    fn config_dir_falls_back_to_default() {
        let result = config_dir(None);
        assert!(result.is_some_and(|p| p.ends_with("portal")));
    }
}
