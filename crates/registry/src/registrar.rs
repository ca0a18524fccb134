use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use genrerows_core::section::GenreSection;

/// Shortest startup delay before registration.
pub const MIN_REGISTRATION_DELAY: Duration = Duration::from_secs(5);

/// Longest startup delay before registration.
pub const MAX_REGISTRATION_DELAY: Duration = Duration::from_secs(10);

/// Errors from registering one section.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// The registry is not installed or not reachable at all.
    #[error("Section registry unavailable: {0}")]
    Unavailable(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The registry answered with a non-2xx status code.
    #[error("Registry rejected the request ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Registers one genre section with a section registry.
#[async_trait]
pub trait SectionRegistrar: Send + Sync {
    /// Short strategy name for logs.
    fn strategy(&self) -> &'static str;

    async fn register_section(&self, section: &GenreSection) -> Result<(), RegistrationError>;
}

/// How rows reach the section registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationMode {
    /// Direct call into an in-process registry.
    InProcess,
    /// POST to the registry plugin's REST endpoint on the host.
    Http,
    /// Rows are not registered anywhere.
    Disabled,
}

impl RegistrationMode {
    /// Startup delay used when no override is configured.
    pub fn default_delay(self) -> Duration {
        match self {
            RegistrationMode::InProcess | RegistrationMode::Disabled => MIN_REGISTRATION_DELAY,
            RegistrationMode::Http => MAX_REGISTRATION_DELAY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationMode::InProcess => "in-process",
            RegistrationMode::Http => "http",
            RegistrationMode::Disabled => "none",
        }
    }
}

impl FromStr for RegistrationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in-process" | "inprocess" => Ok(RegistrationMode::InProcess),
            "http" => Ok(RegistrationMode::Http),
            "none" | "disabled" | "off" => Ok(RegistrationMode::Disabled),
            other => Err(format!(
                "unknown registration mode '{other}' (expected in-process, http or none)"
            )),
        }
    }
}

impl std::fmt::Display for RegistrationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp a configured delay into the supported startup window.
pub fn clamp_delay(delay: Duration) -> Duration {
    delay.clamp(MIN_REGISTRATION_DELAY, MAX_REGISTRATION_DELAY)
}
