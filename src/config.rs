use std::time::Duration;

/// Connection settings for the catalog service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub base_url: String,
    /// Per-request timeout of the HTTP transport.
    pub timeout: Duration,
}

impl Config {
    pub const BASE_URL: &'static str =
        "https://pokemonveloxback-production.up.railway.app";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            Self::BASE_URL,
            Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config =
            Config::new("http://localhost:3000/", Duration::from_secs(1));
        assert_eq!(config.base_url, "http://localhost:3000");
    }
}
