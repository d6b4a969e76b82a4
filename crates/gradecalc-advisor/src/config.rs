//! Advisor configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variables checked for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GRADECALC_API_KEY", "GEMINI_API_KEY"];

/// Advisor configuration.
///
/// Note: Custom Debug impl masks the API key to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Backend credential; absent or blank disables the advisor.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Override for the API base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model to request advice from.
    #[serde(default = "default_model")]
    pub model: String,
    /// Upper bound on reply length.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

impl std::fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_max_output_tokens() -> u32 {
    1024
}
fn default_temperature() -> f64 {
    0.7
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl AdvisorConfig {
    /// The API key, if one is set and not blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradecalc.toml` in the current directory
/// 2. `~/.config/gradecalc/config.toml`
///
/// Environment variable overrides: `GRADECALC_API_KEY`, then `GEMINI_API_KEY`.
pub fn load_config() -> Result<AdvisorConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AdvisorConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => default_config_path(),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<AdvisorConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded advisor config");
            config
        }
        None => AdvisorConfig::default(),
    };

    if let Some(key) = API_KEY_ENV_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
    {
        config.api_key = Some(key);
    }

    config.api_key = config.api_key.as_deref().map(resolve_env_vars);
    config.base_url = config.base_url.as_deref().map(resolve_env_vars);

    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("gradecalc.toml");
    if local.exists() {
        return Some(local);
    }
    let global = dirs_path()?.join("config.toml");
    global.exists().then_some(global)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradecalc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_GRADECALC_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_GRADECALC_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_GRADECALC_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_GRADECALC_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_GRADECALC_TEST_SELF", "a${_GRADECALC_TEST_SELF}b");
        assert_eq!(
            resolve_env_vars("x${_GRADECALC_TEST_SELF}y"),
            "xa${_GRADECALC_TEST_SELF}by"
        );
        std::env::remove_var("_GRADECALC_TEST_SELF");
    }

    #[test]
    fn resolve_env_vars_unclosed_is_kept() {
        assert_eq!(resolve_env_vars("key-${UNCLOSED"), "key-${UNCLOSED");
    }

    #[test]
    fn resolve_env_vars_unset_is_empty() {
        assert_eq!(resolve_env_vars("${_GRADECALC_SURELY_UNSET}"), "");
    }

    #[test]
    fn default_config() {
        let config = AdvisorConfig::default();
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.max_output_tokens, 1024);
        assert!(config.credential().is_none());
    }

    #[test]
    fn blank_key_is_no_credential() {
        let config = AdvisorConfig {
            api_key: Some("   ".into()),
            ..AdvisorConfig::default()
        };
        assert!(config.credential().is_none());
    }

    #[test]
    fn debug_masks_key() {
        let config = AdvisorConfig {
            api_key: Some("sk-secret".into()),
            ..AdvisorConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
api_key = "abc"
model = "gemini-2.5-flash"
"#;
        let config: AdvisorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.credential(), Some("abc"));
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn load_from_file_resolves_env_refs() {
        std::env::set_var("_GRADECALC_TEST_BASE", "http://localhost:9999");
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gradecalc.toml");
        std::fs::write(
            &path,
            "base_url = \"${_GRADECALC_TEST_BASE}/gemini\"\nmax_output_tokens = 300\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9999/gemini"));
        assert_eq!(config.max_output_tokens, 300);
        std::env::remove_var("_GRADECALC_TEST_BASE");
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "model = [").unwrap();

        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/gradecalc.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
