use std::path::PathBuf;
use std::time::Duration;

use genrerows_registry::registrar::clamp_delay;
use genrerows_registry::RegistrationMode;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8097`).
    pub port: u16,
    /// Origin the host and browsers reach this service at, without a
    /// trailing slash. Empty when the service is mounted under the host's own
    /// origin, which keeps callback and script URLs host-relative.
    pub public_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Plugin configuration JSON file, created with defaults when missing.
    pub plugin_config_path: PathBuf,
    /// Base URL of the host media server.
    pub host_url: String,
    /// API key sent to the host as `X-Emby-Token`.
    pub host_api_key: Option<String>,
    /// Catalog fixture; when set the host catalog is not queried.
    pub catalog_file: Option<PathBuf>,
    /// How genre rows reach the section registry.
    pub registration_mode: RegistrationMode,
    /// Wait before registering, already clamped into the supported window.
    pub registration_delay: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                       |
    /// |---------------------------|-------------------------------|
    /// | `HOST`                    | `0.0.0.0`                     |
    /// | `PORT`                    | `8097`                        |
    /// | `PUBLIC_URL`              | `http://localhost:{PORT}`     |
    /// | `CORS_ORIGINS`            | `http://localhost:8096`       |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                          |
    /// | `PLUGIN_CONFIG_PATH`      | `config/genremanager.json`    |
    /// | `HOST_URL`                | `http://localhost:8096`       |
    /// | `HOST_API_KEY`            | unset                         |
    /// | `CATALOG_FILE`            | unset                         |
    /// | `REGISTRATION_MODE`       | `in-process`                  |
    /// | `REGISTRATION_DELAY_SECS` | 5 in-process, 10 http         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8097".into())
            .parse()
            .expect("PORT must be a valid u16");

        let public_url = normalize_public_url(
            &std::env::var("PUBLIC_URL").unwrap_or_else(|_| format!("http://localhost:{port}")),
        );

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8096".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let plugin_config_path = std::env::var("PLUGIN_CONFIG_PATH")
            .unwrap_or_else(|_| "config/genremanager.json".into())
            .into();

        let host_url = std::env::var("HOST_URL").unwrap_or_else(|_| "http://localhost:8096".into());

        let host_api_key = std::env::var("HOST_API_KEY").ok().filter(|k| !k.is_empty());

        let catalog_file = std::env::var("CATALOG_FILE")
            .ok()
            .filter(|f| !f.is_empty())
            .map(PathBuf::from);

        let registration_mode: RegistrationMode = std::env::var("REGISTRATION_MODE")
            .unwrap_or_else(|_| "in-process".into())
            .parse()
            .unwrap_or_else(|e| panic!("REGISTRATION_MODE is invalid: {e}"));

        let registration_delay = match std::env::var("REGISTRATION_DELAY_SECS") {
            Ok(v) => clamp_delay(Duration::from_secs(
                v.parse()
                    .expect("REGISTRATION_DELAY_SECS must be a valid u64"),
            )),
            Err(_) => registration_mode.default_delay(),
        };

        Self {
            host,
            port,
            public_url,
            cors_origins,
            request_timeout_secs,
            jwt,
            plugin_config_path,
            host_url,
            host_api_key,
            catalog_file,
            registration_mode,
            registration_delay,
        }
    }

    /// Absolute URL of one of this service's routes, as handed to the host
    /// and to browsers.
    pub fn public_endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.public_url)
    }
}

fn normalize_public_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
