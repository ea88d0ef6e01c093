use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub upload_timeout_ms: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub default_title: String,
    pub admin_role: String,
    pub page_size: u32,
    pub default_sort: String,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_millis(self.upload_timeout_ms)
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("WFADMIN_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    /// Development defaults pointed at an arbitrary server, used by tests.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.api.base_url = base_url.into();
        config
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("WFADMIN_API_BASE_URL") {
            self.api.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("WFADMIN_REQUEST_TIMEOUT_MS") {
            self.api.request_timeout_ms = v.parse().unwrap_or(self.api.request_timeout_ms);
        }
        if let Ok(v) = env::var("WFADMIN_UPLOAD_TIMEOUT_MS") {
            self.api.upload_timeout_ms = v.parse().unwrap_or(self.api.upload_timeout_ms);
        }
        if let Ok(v) = env::var("WFADMIN_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("WFADMIN_DEFAULT_TITLE") {
            self.ui.default_title = v;
        }
        if let Ok(v) = env::var("WFADMIN_ADMIN_ROLE") {
            self.ui.admin_role = v;
        }
        if let Ok(v) = env::var("WFADMIN_PAGE_SIZE") {
            self.ui.page_size = v.parse().unwrap_or(self.ui.page_size);
        }
        if let Ok(v) = env::var("WFADMIN_DEFAULT_SORT") {
            self.ui.default_sort = v;
        }

        self
    }

    fn ui_defaults() -> UiConfig {
        UiConfig {
            default_title: "Form Workflow Engine".to_string(),
            admin_role: "ADMIN".to_string(),
            page_size: 10,
            default_sort: "id,desc".to_string(),
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                // dev server proxies /api to the engine on 8080
                base_url: "http://localhost:8080/api".to_string(),
                request_timeout_ms: 10_000,
                upload_timeout_ms: 30_000,
                enable_request_logging: true,
            },
            ui: Self::ui_defaults(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.example.com/workflow/api".to_string(),
                request_timeout_ms: 10_000,
                upload_timeout_ms: 30_000,
                enable_request_logging: true,
            },
            ui: Self::ui_defaults(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://app.example.com/workflow/api".to_string(),
                request_timeout_ms: 10_000,
                upload_timeout_ms: 30_000,
                enable_request_logging: false,
            },
            ui: Self::ui_defaults(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

pub fn config() -> &'static ClientConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = ClientConfig::development();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.api.upload_timeout(), Duration::from_secs(30));
        assert_eq!(config.ui.admin_role, "ADMIN");
    }

    #[test]
    fn test_default_production_config() {
        let config = ClientConfig::production();
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.ui.page_size, 10);
        assert_eq!(config.ui.default_sort, "id,desc");
    }

    #[test]
    fn test_for_base_url_keeps_development_defaults() {
        let config = ClientConfig::for_base_url("http://127.0.0.1:9999/api");
        assert_eq!(config.api.base_url, "http://127.0.0.1:9999/api");
        assert!(matches!(config.environment, Environment::Development));
    }
}
