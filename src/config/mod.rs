use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub max_body_bytes: usize,
    /// Remote analysis endpoint. When unset, only the heuristic engine runs.
    pub analysis_provider_url: Option<String>,
    pub analysis_provider_api_key: Option<String>,
    pub analysis_provider_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "https://localhost:5173".to_string()),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| "1048576".to_string())
                .parse()
                .unwrap_or(1_048_576),
            analysis_provider_url: non_empty_var("ANALYSIS_PROVIDER_URL"),
            analysis_provider_api_key: non_empty_var("ANALYSIS_PROVIDER_API_KEY"),
            analysis_provider_timeout_ms: env::var("ANALYSIS_PROVIDER_TIMEOUT_MS")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
        }
    }

    /// Deadline applied to each remote analysis call.
    pub fn analysis_provider_timeout(&self) -> Duration {
        Duration::from_millis(self.analysis_provider_timeout_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            frontend_url: "https://localhost:5173".to_string(),
            max_body_bytes: 1_048_576,
            analysis_provider_url: None,
            analysis_provider_api_key: None,
            analysis_provider_timeout_ms: 8000,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
