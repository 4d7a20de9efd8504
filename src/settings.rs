//! Runtime settings: credentials, notification target and endpoint.
//!
//! # Configuration
//!
//! Settings come from an optional file (format chosen by extension) overlaid
//! by `DOGTRAINER_`-prefixed environment variables:
//!
//! ```toml
//! api_key = "..."
//! app_key = "..."
//! notify_to = "@team-pager"
//! repo_path = "git@github.com:org/monitors.git"
//! ```

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use dogtrainer_client::{DatadogClient, DatadogClientBuilder, DEFAULT_ENDPOINT};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "DOGTRAINER";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_key: String,
    pub app_key: String,
    /// Appended to every generated alert message, e.g. `@team-pager`.
    pub notify_to: Option<String>,
    /// Provenance shown in messages; discovered when absent.
    pub repo_path: Option<String>,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Settings {
    /// Load from `path` (if given) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A client builder carrying these credentials, endpoint and timeout.
    pub fn client_builder(&self) -> DatadogClientBuilder {
        DatadogClient::builder()
            .endpoint(&self.endpoint)
            .credentials(&self.api_key, &self.app_key)
            .timeout(self.timeout())
    }
}
