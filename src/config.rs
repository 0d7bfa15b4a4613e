use std::time::Duration;

use crate::data::loader::Source;

/// Environment variable overriding the sheet location (URL or local path).
pub const SOURCE_ENV: &str = "TRAVIAN_MAP_SOURCE";

/// CSV export of the shared map sheet.
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/1PG1WgRzAW2NkHKEhKzTQocggxCMG_UVZsLJx4GgTp4k/gviz/tq?tqx=out:csv&gid=112640639";

/// How long a loaded sheet stays fresh before it is fetched again.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);
/// Upper bound for a single sheet request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub source: Source,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            source: Source::Url(DEFAULT_SOURCE_URL.to_string()),
            cache_ttl: DEFAULT_CACHE_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Defaults, with the source taken from `TRAVIAN_MAP_SOURCE` when set.
    pub fn from_env() -> Self {
        Self::with_source(std::env::var(SOURCE_ENV).ok().as_deref())
    }

    fn with_source(location: Option<&str>) -> Self {
        let mut config = AppConfig::default();
        if let Some(location) = location.filter(|l| !l.trim().is_empty()) {
            config.source = Source::parse(location);
        }
        config
    }
}
