//! Environment-driven configuration shared across the workspace.
//!
//! Config structs implement [`FromEnv`] and assemble themselves from
//! environment variables via [`env_required`] / [`env_or_default`].

pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Deployment environment, read from `APP_ENV`.
///
/// Anything other than `production` (case-insensitive) counts as
/// development.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(v) if v.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Loads a configuration struct from environment variables.
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Reads `key`, falling back to `default` when unset.
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads `key`, failing with [`ConfigError::MissingEnvVar`] when unset.
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Static application metadata baked in at compile time.
///
/// Construct with the [`app_info!`] macro so the name/version come from the
/// calling crate's manifest, not this library's.
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Capture the calling crate's package name and version as an [`AppInfo`].
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_app_env_means_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn production_matches_any_casing() {
        for spelling in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(spelling), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn unrecognized_app_env_means_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn env_or_default_prefers_the_variable() {
        temp_env::with_var("SOME_VAR", Some("set"), || {
            assert_eq!(env_or_default("SOME_VAR", "fallback"), "set");
        });

        temp_env::with_var_unset("SOME_VAR", || {
            assert_eq!(env_or_default("SOME_VAR", "fallback"), "fallback");
        });
    }

    #[test]
    fn env_required_names_the_missing_key() {
        temp_env::with_var_unset("NEEDED_VAR", || {
            let err = env_required("NEEDED_VAR").unwrap_err();
            assert!(err.to_string().contains("NEEDED_VAR"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn app_info_reports_this_crate() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
