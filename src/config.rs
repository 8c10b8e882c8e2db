//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;

/// Where finished project records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// SQLite file under the platform data directory.
    Default,
    /// In-process map, lost on exit.
    Memory,
    /// SQLite file at an explicit path.
    Path(PathBuf),
}

impl StoreLocation {
    fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Default,
            ":memory:" => Self::Memory,
            path => Self::Path(PathBuf::from(path)),
        }
    }
}

/// Settings for the external completion service.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Without a key every generation call fails, which the wizard turns
    /// into the fallback timeline.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreLocation,
    pub generation: GenerationConfig,
    /// Base URL of a running planner API, used by the CLI client.
    pub server_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store: StoreLocation::Default,
            generation: GenerationConfig::default(),
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unparseable numbers
    /// fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PLAN_WIZARD_PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let timeout_secs = lookup("PLAN_WIZARD_GENERATION_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS);

        Self {
            host: lookup("PLAN_WIZARD_HOST").unwrap_or(defaults.host),
            port,
            store: lookup("PLAN_WIZARD_DB")
                .map(|s| StoreLocation::parse(&s))
                .unwrap_or(StoreLocation::Default),
            generation: GenerationConfig {
                api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
                base_url: lookup("OPENAI_BASE_URL").unwrap_or(defaults.generation.base_url),
                model: lookup("OPENAI_MODEL").unwrap_or(defaults.generation.model),
                timeout: Duration::from_secs(timeout_secs),
            },
            server_url: lookup("PLAN_WIZARD_URL").unwrap_or(defaults.server_url),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.store, StoreLocation::Default);
        assert!(config.generation.api_key.is_none());
        assert_eq!(config.generation.model, "gpt-4o");
        assert_eq!(config.generation.timeout, Duration::from_secs(60));
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PLAN_WIZARD_PORT", "8080"),
            ("PLAN_WIZARD_DB", ":memory:"),
            ("OPENAI_API_KEY", "sk-test"),
            ("PLAN_WIZARD_GENERATION_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.store, StoreLocation::Memory);
        assert_eq!(config.generation.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.generation.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PLAN_WIZARD_PORT", "not-a-port"),
            ("PLAN_WIZARD_GENERATION_TIMEOUT_SECS", "-1"),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.generation.timeout, Duration::from_secs(60));
    }

    #[test]
    fn db_path_is_taken_verbatim() {
        let config = AppConfig::from_lookup(lookup_from(&[("PLAN_WIZARD_DB", "/tmp/plans.db")]));
        assert_eq!(config.store, StoreLocation::Path(PathBuf::from("/tmp/plans.db")));
    }
}
