// Configuration loader
// Loads settings from ~/.chatloop/config.toml, then applies environment overrides

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;

/// Load configuration from the config file (if any) and the environment
///
/// A `.env` file in the working directory is read first so its values are
/// visible as environment variables.
pub fn load_config() -> Result<Config> {
    if dotenvy::dotenv().is_err() {
        tracing::debug!("No .env file found, using environment variables");
    }

    let path = config_path();
    let config = match path.as_deref() {
        Some(path) => load_from_file(path)?.unwrap_or_default(),
        None => Config::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());

    if config.api_key.is_none() {
        tracing::warn!("API_KEY not set; chat and search requests will fail");
    }

    Ok(config)
}

/// `CHATLOOP_CONFIG` if set, else `~/.chatloop/config.toml`
fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CHATLOOP_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".chatloop/config.toml"))
}

/// Parse a TOML config file; `Ok(None)` when it does not exist
pub fn load_from_file(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(Some(config))
}

/// Overlay environment values onto `config`
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(api_key) = non_empty("API_KEY") {
        config.api_key = Some(api_key);
    }
    if let Some(bind) = non_empty("CHATLOOP_BIND") {
        config.bind_address = bind;
    }
    if let Some(model) = non_empty("CHATLOOP_MODEL") {
        config.default_model = model;
    }
    if config.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        config.api_key = None;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_file(&dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_model = \"gpt-4o\"\nmax_rounds = 3\nallowed_commands = [\"ls\"]").unwrap();

        let config = load_from_file(file.path()).unwrap().unwrap();
        assert_eq!(config.default_model, "gpt-4o");
        assert_eq!(config.max_rounds, 3);
        assert_eq!(config.allowed_commands, vec!["ls"]);
        assert_eq!(config.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_rounds = \"many\"").unwrap();

        let err = load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_env_overrides(
            Config::default(),
            env(&[("API_KEY", "secret"), ("CHATLOOP_BIND", "127.0.0.1:9000")]),
        );
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.bind_address, "127.0.0.1:9000");
        assert_eq!(config.default_model, "gpt-5");
    }

    #[test]
    fn test_empty_api_key_is_missing() {
        let config = apply_env_overrides(Config::default(), env(&[("API_KEY", "")]));
        assert!(config.api_key.is_none());

        let mut from_file = Config::default();
        from_file.api_key = Some("  ".to_string());
        assert!(apply_env_overrides(from_file, env(&[])).api_key.is_none());
    }
}
