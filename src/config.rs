//! User configuration: default harmony, extraction size, and extra color keywords.

use std::{env, fs, io::ErrorKind, path::Path, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::color::Color;
use crate::pipeline::extract::DEFAULT_TOP;
use crate::pipeline::harmony::Harmony;
use crate::pipeline::lookup::{ColorDatabase, ColorEntry};

/// Environment variable that overrides the default config location.
pub const CONFIG_PATH_ENV: &str = "TINTLY_CONFIG";
const CONFIG_FILE: &str = "config.json";

/// Immutable runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub default_harmony: Harmony,
    pub extract_count: usize,
    keywords: Vec<ColorEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_harmony: Harmony::Analogous,
            extract_count: DEFAULT_TOP,
            keywords: Vec::new(),
        }
    }
}

/// JSON shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    default_harmony: Option<Harmony>,
    extract_count: Option<usize>,
    keywords: Vec<RawKeyword>,
}

#[derive(Debug, Deserialize)]
struct RawKeyword {
    keyword: String,
    hex: String,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = AppConfig::default();
        let keywords = raw
            .keywords
            .into_iter()
            .filter_map(|k| match Color::from_hex(&k.hex) {
                Ok(color) if !k.keyword.trim().is_empty() => Some(ColorEntry {
                    keyword: k.keyword.trim().to_lowercase(),
                    color,
                    hsl: color.to_hsl(),
                }),
                Ok(_) => {
                    warn!(hex = %k.hex, "skipping keyword with empty name");
                    None
                }
                Err(err) => {
                    warn!(keyword = %k.keyword, error = %err, "skipping keyword with invalid hex");
                    None
                }
            })
            .collect();
        Self {
            default_harmony: raw.default_harmony.unwrap_or(defaults.default_harmony),
            extract_count: raw
                .extract_count
                .filter(|n| *n > 0)
                .unwrap_or(defaults.extract_count),
            keywords,
        }
    }
}

impl AppConfig {
    /// Load configuration, falling back to defaults when the file is missing or invalid.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = resolve_config_path(explicit);
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        keywords = config.keywords.len(),
                        "loaded config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if explicit.is_some() {
                    warn!(path = %path.display(), "config file not found; using defaults");
                } else {
                    info!(path = %path.display(), "no config file; using defaults");
                }
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a config document.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Keyword database with the user's keywords layered over the built-ins.
    pub fn database(&self) -> ColorDatabase {
        ColorDatabase::with_entries(self.keywords.iter().cloned())
    }
}

/// `explicit`, then `$TINTLY_CONFIG`, then `$XDG_CONFIG_HOME/tintly/config.json`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    let config_home = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = env::var("HOME").unwrap_or_else(|_| "~".to_string());
            PathBuf::from(home).join(".config")
        });
    config_home.join("tintly").join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = AppConfig::from_json(
            r##"{
                "default_harmony": "split-complementary",
                "extract_count": 5,
                "keywords": [{ "keyword": "Brand", "hex": "#123456" }]
            }"##,
        )
        .unwrap();
        assert_eq!(config.default_harmony, Harmony::SplitComplementary);
        assert_eq!(config.extract_count, 5);

        let db = config.database();
        let entry = db.lookup("brand refresh").unwrap();
        assert_eq!(entry.keyword, "brand");
        assert_eq!(entry.color, Color::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn invalid_keywords_are_skipped() {
        let config = AppConfig::from_json(
            r##"{ "keywords": [
                { "keyword": "bad", "hex": "#12" },
                { "keyword": " ", "hex": "#123456" },
                { "keyword": "good", "hex": "#abcdef" }
            ] }"##,
        )
        .unwrap();
        let db = config.database();
        assert!(db.get("bad").is_none());
        assert!(db.get("good").is_some());
    }

    #[test]
    fn zero_extract_count_keeps_default() {
        let config = AppConfig::from_json(r#"{ "extract_count": 0 }"#).unwrap();
        assert_eq!(config.extract_count, DEFAULT_TOP);
    }

    #[test]
    fn unknown_harmony_is_an_error() {
        assert!(AppConfig::from_json(r#"{ "default_harmony": "rainbow" }"#).is_err());
    }

    #[test]
    fn load_missing_file_falls_back() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/tintly.json")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_invalid_file_falls_back() {
        let dir = std::env::temp_dir().join("tintly-test-config-invalid");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_reads_file() {
        let dir = std::env::temp_dir().join("tintly-test-config-valid");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, r#"{ "default_harmony": "shades" }"#).unwrap();

        assert_eq!(AppConfig::load(Some(&path)).default_harmony, Harmony::Shades);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/tmp/explicit.json");
        assert_eq!(resolve_config_path(Some(path)), path);
    }
}
