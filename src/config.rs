use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
/// Hands out the session cookie the crumb endpoint requires
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOCALE: &str = "en";

/// Runtime settings taken from the environment (and `.env`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub locale: String,
    pub base_url: String,
    pub cookie_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie_url: DEFAULT_COOKIE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let timeout = match get("STOCKBOARD_TIMEOUT_SECS").map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                tracing::warn!("STOCKBOARD_TIMEOUT_SECS is not a positive integer, using default");
                defaults.timeout
            }
            None => defaults.timeout,
        };

        Self {
            locale: get("STOCKBOARD_LOCALE").unwrap_or(defaults.locale),
            base_url: get("STOCKBOARD_YAHOO_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            cookie_url: get("STOCKBOARD_YAHOO_COOKIE_URL").unwrap_or(defaults.cookie_url),
            user_agent: get("STOCKBOARD_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout,
        }
    }
}
