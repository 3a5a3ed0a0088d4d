use std::{env, str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub mongodb_max_pool_size: u32,
    pub mongodb_min_pool_size: u32,

    pub host: String,
    pub port: u16,

    pub feed_base_url: String,
    pub poll_interval: Duration,
    pub fetch_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            mongodb_db: "crypto".to_string(),
            mongodb_max_pool_size: 10,
            mongodb_min_pool_size: 10,
            host: "0.0.0.0".to_string(),
            port: 9090,
            feed_base_url: "https://api.gdax.com".to_string(),
            poll_interval: Duration::from_secs(10),
            fetch_timeout: Duration::from_secs(5),
        }
    }
}

fn parsed_or<T: FromStr>(value: Option<String>, fallback: T) -> T {
    value
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(fallback)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    load_from(|key| env::var(key).ok())
}

/// Builds settings from any key lookup. Missing or unparsable values fall
/// back to the defaults.
pub fn load_from<F>(lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Settings::default();

    let mongodb_uri = lookup("MONGODB_URI").unwrap_or(defaults.mongodb_uri);
    let mongodb_db = lookup("MONGODB_DB").unwrap_or(defaults.mongodb_db);

    let mongodb_max_pool_size =
        parsed_or(lookup("MONGODB_MAX_POOL_SIZE"), defaults.mongodb_max_pool_size).max(1);
    // idle connections kept warm, capped by the max
    let mongodb_min_pool_size =
        parsed_or(lookup("MONGODB_MIN_POOL_SIZE"), defaults.mongodb_min_pool_size)
            .min(mongodb_max_pool_size);

    let host = lookup("HOST").unwrap_or(defaults.host);
    let port = parsed_or(lookup("PORT"), defaults.port);

    let feed_base_url = lookup("FEED_BASE_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or(defaults.feed_base_url);

    let poll_secs = parsed_or(lookup("POLL_INTERVAL_SECS"), defaults.poll_interval.as_secs());
    let timeout_secs = parsed_or(lookup("FETCH_TIMEOUT_SECS"), defaults.fetch_timeout.as_secs());

    Settings {
        mongodb_uri,
        mongodb_db,
        mongodb_max_pool_size,
        mongodb_min_pool_size,
        host,
        port,
        feed_base_url,
        poll_interval: Duration::from_secs(poll_secs.max(1)),
        fetch_timeout: Duration::from_secs(timeout_secs.max(1)),
    }
}
