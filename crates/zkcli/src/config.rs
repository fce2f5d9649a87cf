//! Shell configuration.
//!
//! Settings resolve in order: built-in defaults, environment variables,
//! then the `-server` invocation argument. Environment variables are bound
//! through clap; the process arguments never reach the clap parser because
//! the single-dash `-server` grammar is parsed by [`crate::invocation`].

use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use crate::error::ConfigError;

/// Server dialled when nothing else is configured.
pub const DEFAULT_SERVER: &str = "127.0.0.1:2181";

/// Session timeout used when nothing else is configured.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_millis(3000);

/// Environment variable overriding the server address.
pub const ENV_SERVER: &str = "ZKCLI_SERVER";

/// Environment variable overriding the session timeout, in milliseconds.
pub const ENV_SESSION_TIMEOUT_MS: &str = "ZKCLI_SESSION_TIMEOUT_MS";

/// Environment variable enabling the event echo. Accepts the usual boolean
/// spellings (`1/true/yes/on`, `0/false/no/off`).
pub const ENV_PRINT_EVENTS: &str = "ZKCLI_PRINT_EVENTS";

/// Environment-bound settings.
#[derive(Parser, Debug, Clone)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct EnvSettings {
    /// `host:port` of the coordination service.
    #[arg(long, env = ENV_SERVER, value_name = ENV_SERVER, default_value = DEFAULT_SERVER)]
    server: String,

    /// Session timeout in milliseconds.
    #[arg(
        long,
        env = ENV_SESSION_TIMEOUT_MS,
        value_name = ENV_SESSION_TIMEOUT_MS,
        default_value_t = 3000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    session_timeout_ms: u64,

    /// Echo session events to stdout.
    #[arg(
        long,
        env = ENV_PRINT_EVENTS,
        value_name = ENV_PRINT_EVENTS,
        action = ArgAction::Set,
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    print_events: bool,
}

impl From<EnvSettings> for ShellConfig {
    fn from(settings: EnvSettings) -> Self {
        Self {
            server: settings.server.trim().to_string(),
            session_timeout: Duration::from_millis(settings.session_timeout_ms),
            print_events: settings.print_events,
        }
    }
}

/// Resolved shell configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// `host:port` of the coordination service.
    pub server: String,
    /// Session timeout passed to the client library.
    pub session_timeout: Duration,
    /// Echo session events to stdout as well as the log.
    pub print_events: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            print_events: false,
        }
    }
}

impl ShellConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_settings(EnvSettings::try_parse_from(std::iter::empty::<String>()))
    }

    fn from_settings(settings: Result<EnvSettings, clap::Error>) -> Result<Self, ConfigError> {
        let config = Self::from(settings.map_err(environment_error)?);
        config.validate()?;
        Ok(config)
    }

    /// Replaces the server address when the invocation named one.
    #[must_use]
    pub fn with_server(mut self, server: Option<String>) -> Self {
        if let Some(server) = server {
            self.server = server;
        }
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the server address is empty or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.trim().is_empty() {
            return Err(ConfigError::EmptyServer);
        }

        if self.session_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                value: self.session_timeout.as_millis().to_string(),
            });
        }

        Ok(())
    }
}

/// Keeps the first line of clap's report, without its `error: ` prefix.
fn environment_error(err: clap::Error) -> ConfigError {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    ConfigError::Environment(first.trim_start_matches("error: ").to_string())
}
