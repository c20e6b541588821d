use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub max_question_len: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads vars with defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            api_base_url: get_var_or("API_BASE_URL", "http://localhost:8000")
                .trim_end_matches('/')
                .to_owned(),
            host: get_var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", "8501")?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30")?,
            cache_ttl_secs: parse_var("CACHE_TTL_SECS", "300")?,
            max_question_len: parse_var("MAX_QUESTION_LENGTH", "2000")?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_var<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_var_or(key, default)
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("invalid {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_apply_without_env() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::remove_var("API_BASE_URL");
        env::remove_var("PORT");
        env::remove_var("REQUEST_TIMEOUT_SECS");
        env::remove_var("MAX_QUESTION_LENGTH");

        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.api_base_url, "http://localhost:8000");
        assert_eq!(cfg.port, 8501);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.cache_ttl_secs, 300);
        assert_eq!(cfg.max_question_len, 2000);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("API_BASE_URL", "http://api.internal:8000/");
        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.api_base_url, "http://api.internal:8000");
        env::remove_var("API_BASE_URL");
    }

    #[test]
    fn invalid_port_fails() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("PORT", "not-a-port");
        let result = AppConfig::from_env();
        assert!(result.is_err());
        env::remove_var("PORT");
    }

    #[test]
    fn bind_addr_formats_correctly() {
        let cfg = AppConfig {
            api_base_url: String::new(),
            host: "127.0.0.1".to_owned(),
            port: 3000,
            log_level: "debug".to_owned(),
            request_timeout_secs: 30,
            cache_ttl_secs: 300,
            max_question_len: 2000,
        };
        assert_eq!(cfg.bind_addr(), "127.0.0.1:3000");
    }
}
