use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constant::*;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    // Text completion
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub gemini_timeout_secs: u64,

    // Mail provider
    pub gmail_token_path: PathBuf,
    pub gmail_api_base: String,
    pub mail_window_hours: u32,
    pub mail_timeout_secs: u64,

    // Feeds
    pub feed_timeout_secs: u64,
    pub feed_user_agent: String,
    pub feed_entry_limit: usize,

    // Page + briefing
    pub page_title: String,
    pub user_context_path: PathBuf,
    pub weather_location: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_base: DEFAULT_GEMINI_API_BASE.into(),
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
            gmail_token_path: PathBuf::from("token.json"),
            gmail_api_base: DEFAULT_GMAIL_API_BASE.into(),
            mail_window_hours: DEFAULT_MAIL_WINDOW_HOURS,
            mail_timeout_secs: DEFAULT_MAIL_TIMEOUT_SECS,
            feed_timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
            feed_user_agent: DEFAULT_USER_AGENT.into(),
            feed_entry_limit: DEFAULT_ENTRY_LIMIT,
            page_title: DEFAULT_PAGE_TITLE.into(),
            user_context_path: PathBuf::from("USER_CONTEXT.md"),
            weather_location: DEFAULT_WEATHER_LOCATION.into(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source, falling back to
    /// the defaults for anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());
        let gemini_api_base = lookup("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base);
        let gemini_model = lookup("GEMINI_MODEL").unwrap_or(defaults.gemini_model);
        let gemini_timeout_secs =
            parse_timeout(&lookup, "GEMINI_TIMEOUT_SECS", defaults.gemini_timeout_secs)?;

        let gmail_token_path = lookup("GMAIL_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.gmail_token_path);
        let gmail_api_base = lookup("GMAIL_API_BASE").unwrap_or(defaults.gmail_api_base);
        let mail_window_hours = parse_var(&lookup, "MAIL_WINDOW_HOURS", defaults.mail_window_hours)?;
        let mail_timeout_secs =
            parse_timeout(&lookup, "MAIL_TIMEOUT_SECS", defaults.mail_timeout_secs)?;

        let feed_timeout_secs =
            parse_timeout(&lookup, "FEED_TIMEOUT_SECS", defaults.feed_timeout_secs)?;
        let feed_user_agent = lookup("FEED_USER_AGENT").unwrap_or(defaults.feed_user_agent);
        let feed_entry_limit = parse_var(&lookup, "FEED_ENTRY_LIMIT", defaults.feed_entry_limit)?;

        let page_title = lookup("PAGE_TITLE").unwrap_or(defaults.page_title);
        let user_context_path = lookup("USER_CONTEXT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.user_context_path);
        let weather_location = lookup("WEATHER_LOCATION").unwrap_or(defaults.weather_location);

        Ok(Config {
            gemini_api_key,
            gemini_api_base,
            gemini_model,
            gemini_timeout_secs,
            gmail_token_path,
            gmail_api_base,
            mail_window_hours,
            mail_timeout_secs,
            feed_timeout_secs,
            feed_user_agent,
            feed_entry_limit,
            page_title,
            user_context_path,
            weather_location,
        })
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    pub fn mail_timeout(&self) -> Duration {
        Duration::from_secs(self.mail_timeout_secs)
    }

    pub fn gemini_timeout(&self) -> Duration {
        Duration::from_secs(self.gemini_timeout_secs)
    }

    pub fn require_gemini_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key
            .as_deref()
            .ok_or(ConfigError::Missing("GEMINI_API_KEY"))
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

/// Timeouts must be positive; a zero duration would fail every request.
fn parse_timeout(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    match parse_var(lookup, name, default)? {
        0 => Err(ConfigError::Invalid {
            name,
            value: "0".into(),
        }),
        secs => Ok(secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.feed_timeout(), Duration::from_secs(30));
        assert_eq!(config.mail_timeout(), Duration::from_secs(30));
        assert_eq!(config.gemini_timeout(), Duration::from_secs(120));
        assert_eq!(config.feed_entry_limit, 9);
        assert_eq!(config.mail_window_hours, 24);
        assert_eq!(config.page_title, "CBC News Headlines");
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("FEED_TIMEOUT_SECS", "5"),
            ("FEED_ENTRY_LIMIT", "3"),
            ("MAIL_WINDOW_HOURS", "48"),
            ("GEMINI_API_KEY", "secret"),
            ("MAIL_TIMEOUT_SECS", "10"),
            ("GEMINI_TIMEOUT_SECS", "45"),
        ]))
        .unwrap();
        assert_eq!(config.feed_timeout_secs, 5);
        assert_eq!(config.mail_timeout(), Duration::from_secs(10));
        assert_eq!(config.gemini_timeout(), Duration::from_secs(45));
        assert_eq!(config.feed_entry_limit, 3);
        assert_eq!(config.mail_window_hours, 48);
        assert_eq!(config.require_gemini_api_key().unwrap(), "secret");
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_lookup(lookup_from(&[("FEED_ENTRY_LIMIT", "many")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "FEED_ENTRY_LIMIT",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        for name in ["FEED_TIMEOUT_SECS", "MAIL_TIMEOUT_SECS", "GEMINI_TIMEOUT_SECS"] {
            assert!(Config::from_lookup(lookup_from(&[(name, "0")])).is_err(), "{name}");
        }
    }

    #[test]
    fn test_missing_api_key() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(matches!(
            config.require_gemini_api_key(),
            Err(ConfigError::Missing("GEMINI_API_KEY"))
        ));
    }
}
