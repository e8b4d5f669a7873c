use std::{env, fmt::Display, str::FromStr};

use log::{info, warn};

/// Runtime settings, read from the environment once at start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the hosted backend; `None` runs offline against memory
    pub api_url: Option<String>,
    /// Sent as the `apikey` header to the hosted backend
    pub api_key: String,
    /// Password the offline backend accepts for moderation
    pub admin_password: String,
    /// Accepted submissions per client id and per IP
    pub max_per_client: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: String::new(),
            admin_password: Self::DEFAULT_ADMIN_PASSWORD.to_string(),
            max_per_client: Self::DEFAULT_MAX_PER_CLIENT,
        }
    }
}

impl AppConfig {
    pub const DEFAULT_ADMIN_PASSWORD: &'static str = "change-me";
    pub const DEFAULT_MAX_PER_CLIENT: usize = 5;

    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `load` uses the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("PUMPKIN_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        if api_url.is_none() {
            info!("PUMPKIN_API_URL not set, running offline with an in-memory backend");
        }

        Self {
            api_url,
            api_key: lookup("PUMPKIN_API_KEY").unwrap_or_default(),
            admin_password: try_load(&lookup, "ADMIN_PASSWORD", Self::DEFAULT_ADMIN_PASSWORD.to_string()),
            max_per_client: try_load(&lookup, "PUMPKIN_MAX_PER_CLIENT", Self::DEFAULT_MAX_PER_CLIENT),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.api_url.is_none()
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value: {e}, using default {default}");
            default
        }),
        None => {
            info!("{key} not set, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_are_offline() {
        let config = config_from(&[]);
        assert_eq!(config, AppConfig::default());
        assert!(config.is_offline());
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let config = config_from(&[("PUMPKIN_API_URL", "https://example.test/ ")]);
        assert_eq!(config.api_url.as_deref(), Some("https://example.test"));
    }

    #[test]
    fn test_invalid_quota_falls_back() {
        let config = config_from(&[("PUMPKIN_MAX_PER_CLIENT", "lots")]);
        assert_eq!(config.max_per_client, AppConfig::DEFAULT_MAX_PER_CLIENT);

        let config = config_from(&[("PUMPKIN_MAX_PER_CLIENT", "3")]);
        assert_eq!(config.max_per_client, 3);
    }
}
