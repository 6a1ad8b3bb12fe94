use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:8082/api/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_endpoint: String,
    pub session_dir: Option<PathBuf>,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            session_dir: None,
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config {
            api_endpoint: env::var("API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string()),
            session_dir: env::var("SESSION_DIR").ok().map(PathBuf::from),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API_ENDPOINT is not set"));
        }

        let url = url::Url::parse(&self.api_endpoint)
            .map_err(|e| anyhow::anyhow!("API_ENDPOINT is not a valid URL: {}", e))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow::anyhow!(
                "API_ENDPOINT must start with 'http://' or 'https://'"
            ));
        }

        if self.is_production() && url.scheme() != "https" {
            return Err(anyhow::anyhow!("API_ENDPOINT must use https in production"));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let config = Config {
            api_endpoint: "ftp://example.com/api".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_endpoint() {
        let config = Config {
            api_endpoint: "localhost".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_production_requires_https() {
        let config = Config {
            environment: "production".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            api_endpoint: "https://qkart.example.com/api/v1".to_string(),
            environment: "production".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
