//! Server configuration, read from the environment (and a `.env` file when present).

use crate::error::{AppError, Result};
use actix_web::cookie::Key;
use log::warn;
use std::path::PathBuf;
use std::str::FromStr;

/// Minimum length of `SECRET_KEY`. Cookie signing keys are derived from it.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Store file holding the `pdfs` and `sheets` collections.
    pub data_file: PathBuf,
    pub users_file: PathBuf,
    pub upload_dir: PathBuf,
    pub environment: Environment,
    /// Secret the session cookie signing key is derived from. Required outside development.
    pub secret_key: Option<String>,
    pub session_ttl_hours: i64,
    pub secure_cookies: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so tests can supply values
    /// without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("TEAMDOCS_HOST").unwrap_or_else(default_host);
        let port = match lookup("TEAMDOCS_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("TEAMDOCS_PORT is not a port: {}", raw)))?,
            None => default_port(),
        };
        let environment = match lookup("TEAMDOCS_ENV") {
            Some(raw) => raw.parse().map_err(AppError::Config)?,
            None => Environment::default(),
        };
        let session_ttl_hours = match lookup("TEAMDOCS_SESSION_TTL_HOURS") {
            Some(raw) => raw.parse().ok().filter(|h: &i64| *h > 0).ok_or_else(|| {
                AppError::Config(format!(
                    "TEAMDOCS_SESSION_TTL_HOURS must be a positive number: {}",
                    raw
                ))
            })?,
            None => 12,
        };
        let secure_cookies = lookup("TEAMDOCS_SECURE_COOKIES")
            .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
            .unwrap_or(false);

        let config = Config {
            host,
            port,
            data_file: lookup("TEAMDOCS_DATA_FILE")
                .unwrap_or_else(|| "storage.json".to_string())
                .into(),
            users_file: lookup("TEAMDOCS_USERS_FILE")
                .unwrap_or_else(|| "users.json".to_string())
                .into(),
            upload_dir: lookup("TEAMDOCS_UPLOAD_DIR")
                .unwrap_or_else(|| "uploads/pdfs".to_string())
                .into(),
            environment,
            secret_key: lookup("SECRET_KEY").filter(|s| !s.is_empty()),
            session_ttl_hours,
            secure_cookies,
        };
        Ok(config)
    }

    /// Checks the settings the server cannot start without. Admin commands that only
    /// touch the users file skip this.
    pub fn validate(&self) -> Result<()> {
        match (&self.secret_key, self.environment) {
            (Some(secret), _) if secret.len() < MIN_SECRET_LEN => Err(AppError::Config(format!(
                "SECRET_KEY must be at least {} bytes long",
                MIN_SECRET_LEN
            ))),
            (None, Environment::Production) => Err(AppError::Config(
                "SECRET_KEY is required unless TEAMDOCS_ENV=development".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// The cookie signing key. In development without a secret a random key is used,
    /// which logs everyone out on restart.
    pub fn signing_key(&self) -> Key {
        match &self.secret_key {
            Some(secret) => Key::derive_from(secret.as_bytes()),
            None => {
                warn!("SECRET_KEY not set; using a random per-process session key (development only)");
                Key::generate()
            }
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let config = Config::from_lookup(lookup(&[("SECRET_KEY", SECRET)])).unwrap();
        config.validate().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_file, PathBuf::from("storage.json"));
        assert_eq!(config.users_file, PathBuf::from("users.json"));
        assert_eq!(config.upload_dir, PathBuf::from("uploads/pdfs"));
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.session_ttl_hours, 12);
        assert!(!config.secure_cookies);
    }

    #[test]
    fn production_requires_a_secret() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn short_secrets_are_rejected_everywhere() {
        let config = Config::from_lookup(lookup(&[
            ("SECRET_KEY", "dev-fallback"),
            ("TEAMDOCS_ENV", "development"),
        ]))
        .unwrap();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn development_runs_without_a_secret() {
        let config = Config::from_lookup(lookup(&[("TEAMDOCS_ENV", "development")])).unwrap();
        config.validate().unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.secret_key.is_none());
        let _ = config.signing_key();
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("SECRET_KEY", SECRET),
            ("TEAMDOCS_HOST", "0.0.0.0"),
            ("TEAMDOCS_PORT", "9000"),
            ("TEAMDOCS_UPLOAD_DIR", "/tmp/uploads/pdfs"),
            ("TEAMDOCS_SESSION_TTL_HOURS", "2"),
            ("TEAMDOCS_SECURE_COOKIES", "true"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 9000));
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/uploads/pdfs"));
        assert_eq!(config.session_ttl_hours, 2);
        assert!(config.secure_cookies);
    }

    #[test]
    fn bad_numbers_are_config_errors() {
        assert!(Config::from_lookup(lookup(&[
            ("SECRET_KEY", SECRET),
            ("TEAMDOCS_PORT", "eighty")
        ]))
        .is_err());
        assert!(Config::from_lookup(lookup(&[
            ("SECRET_KEY", SECRET),
            ("TEAMDOCS_SESSION_TTL_HOURS", "0")
        ]))
        .is_err());
    }
}
