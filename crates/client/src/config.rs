//! Client configuration.

/// Environment variable naming the API base URL.
pub const API_URL_ENV: &str = "AULA_API_URL";

const DEV_API_URL: &str = "http://localhost:3001/api";

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from `AULA_API_URL`, falling back to the local dev
    /// API when unset.
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| {
            tracing::warn!("{API_URL_ENV} not set; using local dev API");
            DEV_API_URL.to_string()
        });
        Self { base_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_url_is_kept_verbatim() {
        let config = ClientConfig::new("https://api.example.edu/v1");
        assert_eq!(config.base_url, "https://api.example.edu/v1");
    }
}
