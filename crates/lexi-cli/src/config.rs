//! `lexi.toml` loading, mirroring `core-config`'s `ConfigFile`/`load_from`
//! shape: tolerant defaults, `serde(default)` on every field, a raw fallback
//! on parse failure rather than a hard error.

use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, serde::Deserialize, Default, Clone)]
pub struct CliConfig {
    /// Lexer name used when `--lexer` isn't given on the command line.
    #[serde(default)]
    pub default_lexer: Option<String>,
    /// Per-lexer property overrides, e.g. `[lexer.cpp] fold = "0"`.
    /// Values are applied with `Lexer::property_set` after registry lookup,
    /// so they're kept as strings rather than typed fields.
    #[serde(default)]
    pub lexer: HashMap<String, HashMap<String, String>>,
}

/// Prefer `./lexi.toml`, falling back to a user config directory the same
/// way `core-config::discover` falls back to a platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("lexi.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("lexi").join("lexi.toml");
    }
    PathBuf::from("lexi.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<CliConfig> {
    let path = path.unwrap_or_else(discover);
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<CliConfig>(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!(target: "config", path = %path.display(), %err, "config_parse_failed_using_defaults");
                Ok(CliConfig::default())
            }
        },
        Err(_) => Ok(CliConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_lexi_config__.toml"))).unwrap();
        assert!(cfg.default_lexer.is_none());
        assert!(cfg.lexer.is_empty());
    }

    #[test]
    fn parses_default_lexer_and_overrides() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "default_lexer = \"cpp\"\n\n[lexer.cpp]\nfold = \"0\"\n\"fold.comment\" = \"1\"\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.default_lexer.as_deref(), Some("cpp"));
        let overrides = cfg.lexer.get("cpp").expect("cpp overrides present");
        assert_eq!(overrides.get("fold").map(String::as_str), Some("0"));
        assert_eq!(overrides.get("fold.comment").map(String::as_str), Some("1"));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "this is not valid toml =====").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.default_lexer.is_none());
    }
}
