//! Client configuration resolved from build-time environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment at runtime, so values are baked
//! in with `option_env!` when the bundle is compiled. Parsing goes through a
//! lookup function so tests can feed values without touching the real env.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_USER_KEY: &str = "user";
pub const DEFAULT_LOGOUT_TIMEOUT_MS: u32 = 8000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown STOREFRONT_LOG_LEVEL: {0}")]
    LogLevel(String),
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Console verbosity for the browser logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn as_log_level(self) -> log::Level {
        match self {
            Self::Error => log::Level::Error,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST base URL without a trailing slash (e.g. `/api`).
    pub api_base_url: String,
    /// Storage key holding the bearer token.
    pub token_key: String,
    /// Storage key holding the serialized user record.
    pub user_key: String,
    /// Upper bound on the remote logout call before local sign-out proceeds.
    pub logout_timeout_ms: u32,
    pub log_level: LogLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            user_key: DEFAULT_USER_KEY.to_owned(),
            logout_timeout_ms: DEFAULT_LOGOUT_TIMEOUT_MS,
            log_level: LogLevel::default(),
        }
    }
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `STOREFRONT_API_URL`: default `/api`
    /// - `STOREFRONT_TOKEN_KEY`: default `token`
    /// - `STOREFRONT_USER_KEY`: default `user`
    /// - `STOREFRONT_LOGOUT_TIMEOUT_MS`: default 8000
    /// - `STOREFRONT_LOG_LEVEL`: `error`, `warn`, `info` (default), `debug`, `trace`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown log level or an empty storage key.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                "STOREFRONT_API_URL" => option_env!("STOREFRONT_API_URL"),
                "STOREFRONT_TOKEN_KEY" => option_env!("STOREFRONT_TOKEN_KEY"),
                "STOREFRONT_USER_KEY" => option_env!("STOREFRONT_USER_KEY"),
                "STOREFRONT_LOGOUT_TIMEOUT_MS" => option_env!("STOREFRONT_LOGOUT_TIMEOUT_MS"),
                "STOREFRONT_LOG_LEVEL" => option_env!("STOREFRONT_LOG_LEVEL"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown log level or an empty storage key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("STOREFRONT_API_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let token_key = storage_key(lookup("STOREFRONT_TOKEN_KEY"), "STOREFRONT_TOKEN_KEY", DEFAULT_TOKEN_KEY)?;
        let user_key = storage_key(lookup("STOREFRONT_USER_KEY"), "STOREFRONT_USER_KEY", DEFAULT_USER_KEY)?;
        let logout_timeout_ms = lookup("STOREFRONT_LOGOUT_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_LOGOUT_TIMEOUT_MS);
        let log_level = parse_log_level(lookup("STOREFRONT_LOG_LEVEL").as_deref())?;

        Ok(Self { api_base_url, token_key, user_key, logout_timeout_ms, log_level })
    }
}

fn storage_key(raw: Option<String>, var: &'static str, default: &str) -> Result<String, ConfigError> {
    match raw {
        None => Ok(default.to_owned()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(value) => Ok(value.trim().to_owned()),
    }
}

fn parse_log_level(raw: Option<&str>) -> Result<LogLevel, ConfigError> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref().unwrap_or("info") {
        "error" => Ok(LogLevel::Error),
        "warn" => Ok(LogLevel::Warn),
        "info" => Ok(LogLevel::Info),
        "debug" => Ok(LogLevel::Debug),
        "trace" => Ok(LogLevel::Trace),
        other => Err(ConfigError::LogLevel(other.to_owned())),
    }
}
