//! Endpoint and runtime settings.

use std::time::Duration;

/// Where DolarToday publishes its rate snapshot.
pub const DEFAULT_URL: &str = "https://s3.amazonaws.com/dolartoday/data.json";

/// Name shown in usage text.
pub const PROGRAM_NAME: &str = "dolarToday";

/// Settings for a single run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Endpoint serving the JSON snapshot.
    pub url: String,
    /// Upper bound for the whole request. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: DEFAULT_URL.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    pub fn with_url(url: impl Into<String>) -> Self {
        Config {
            url: url.into(),
            ..Config::default()
        }
    }
}
