//! Store configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::memory::MemoryStore;
use crate::postgrest::PostgrestStore;
use crate::traits::QuestionStore;

/// Configuration for a single store backend.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    Postgrest {
        url: String,
        api_key: String,
    },
    Memory {
        #[serde(default)]
        pool_file: Option<PathBuf>,
    },
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreConfig::Postgrest { url, api_key: _ } => f
                .debug_struct("Postgrest")
                .field("url", url)
                .field("api_key", &"***")
                .finish(),
            StoreConfig::Memory { pool_file } => f
                .debug_struct("Memory")
                .field("pool_file", pool_file)
                .finish(),
        }
    }
}

/// Top-level kentei configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KenteiConfig {
    /// Store configurations keyed by name.
    #[serde(default)]
    pub stores: HashMap<String, StoreConfig>,
    /// Default store to use.
    #[serde(default = "default_store")]
    pub default_store: String,
    /// Session length in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Where the pending result between commands is kept.
    #[serde(default = "default_handoff_file")]
    pub handoff_file: PathBuf,
}

fn default_store() -> String {
    "postgrest".to_string()
}
fn default_time_limit() -> u64 {
    kentei_core::session::DEFAULT_TIME_LIMIT_SECS
}
fn default_handoff_file() -> PathBuf {
    PathBuf::from(kentei_core::handoff::DEFAULT_HANDOFF_FILE)
}

impl Default for KenteiConfig {
    fn default() -> Self {
        Self {
            stores: HashMap::new(),
            default_store: default_store(),
            time_limit_secs: default_time_limit(),
            handoff_file: default_handoff_file(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Resolve env vars in a store config.
fn resolve_store_config(config: &StoreConfig) -> StoreConfig {
    match config {
        StoreConfig::Postgrest { url, api_key } => StoreConfig::Postgrest {
            url: resolve_env_vars(url),
            api_key: resolve_env_vars(api_key),
        },
        StoreConfig::Memory { pool_file } => StoreConfig::Memory {
            pool_file: pool_file.clone(),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `kentei.toml` in the current directory
/// 2. `~/.config/kentei/config.toml`
///
/// Environment variable overrides: `KENTEI_STORE_URL`, `KENTEI_STORE_KEY`.
pub fn load_config() -> Result<KenteiConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<KenteiConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("kentei.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<KenteiConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => KenteiConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("KENTEI_STORE_URL") {
        config
            .stores
            .entry("postgrest".into())
            .or_insert(StoreConfig::Postgrest {
                url: String::new(),
                api_key: String::new(),
            });
        if let Some(StoreConfig::Postgrest { url: u, .. }) = config.stores.get_mut("postgrest") {
            *u = url;
        }
    }

    if let Ok(key) = std::env::var("KENTEI_STORE_KEY") {
        config
            .stores
            .entry("postgrest".into())
            .or_insert(StoreConfig::Postgrest {
                url: String::new(),
                api_key: String::new(),
            });
        if let Some(StoreConfig::Postgrest { api_key, .. }) = config.stores.get_mut("postgrest") {
            *api_key = key;
        }
    }

    // Resolve env vars in all store configs
    let resolved: HashMap<String, StoreConfig> = config
        .stores
        .iter()
        .map(|(k, v)| (k.clone(), resolve_store_config(v)))
        .collect();
    config.stores = resolved;

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("kentei"))
}

/// Create a store instance from its configuration.
pub fn connect(name: &str, config: &StoreConfig) -> Result<Box<dyn QuestionStore>> {
    match config {
        StoreConfig::Postgrest { url, api_key } => {
            let _ = name;
            Ok(Box::new(PostgrestStore::new(url, api_key)))
        }
        StoreConfig::Memory { pool_file } => {
            let pool = match pool_file {
                Some(path) => kentei_core::pool::load_pool(path)?,
                None => Vec::new(),
            };
            Ok(Box::new(MemoryStore::new(pool)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_KENTEI_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_KENTEI_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_KENTEI_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_KENTEI_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = KenteiConfig::default();
        assert_eq!(config.default_store, "postgrest");
        assert_eq!(config.time_limit_secs, 3600);
        assert_eq!(config.handoff_file, PathBuf::from("kentei-session.json"));
    }

    #[test]
    fn parse_store_config() {
        let toml_str = r#"
default_store = "postgrest"
time_limit_secs = 1800

[stores.postgrest]
type = "postgrest"
url = "https://example.supabase.co"
api_key = "service-key"

[stores.local]
type = "memory"
pool_file = "pool.json"
"#;
        let config: KenteiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.stores.len(), 2);
        assert_eq!(config.time_limit_secs, 1800);
        assert!(matches!(
            config.stores.get("postgrest"),
            Some(StoreConfig::Postgrest { .. })
        ));
        assert!(matches!(
            config.stores.get("local"),
            Some(StoreConfig::Memory { .. })
        ));
    }

    #[test]
    fn debug_masks_api_keys() {
        let config = StoreConfig::Postgrest {
            url: "https://example.supabase.co".into(),
            api_key: "very-secret".into(),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("***"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/kentei.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kentei.toml");
        std::fs::write(
            &path,
            r#"
default_store = "local"

[stores.local]
type = "memory"
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_store, "local");
    }

    #[tokio::test]
    async fn connect_memory_with_pool_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        std::fs::write(
            &path,
            r#"[{
                "id": 1,
                "category": "culture",
                "text": "Which saying predicts rain from a halo around the moon?",
                "options": {"a": "Evening halo", "b": "Moon halo", "c": "Red sky", "d": "Sea mist"},
                "answer": "B"
            }]"#,
        )
        .unwrap();

        let store = connect(
            "local",
            &StoreConfig::Memory {
                pool_file: Some(path),
            },
        )
        .unwrap();
        assert_eq!(store.name(), "memory");

        let pool = store.fetch_pool().await.unwrap();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn connect_postgrest() {
        let store = connect(
            "postgrest",
            &StoreConfig::Postgrest {
                url: "https://example.supabase.co".into(),
                api_key: "key".into(),
            },
        )
        .unwrap();
        assert_eq!(store.name(), "postgrest");
    }
}
