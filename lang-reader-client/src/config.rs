use std::env;

use strum::{Display, EnumString};

pub const API_URL_VAR: &str = "LANG_READER_API_URL";
pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";

const LOCAL_API_URL: &str = "http://localhost:3000/api";
const PRODUCTION_API_URL: &str = "https://lang-reader.azurewebsites.net/api";

/// Deployment environment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Self::Local => LOCAL_API_URL,
            Self::Production => PRODUCTION_API_URL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the project API, e.g. "http://localhost:3000/api"
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: LOCAL_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Resolve the base URL from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(env::var(API_URL_VAR).ok(), env::var(ENVIRONMENT_VAR).ok())
    }

    /// An explicit, non-blank URL wins; otherwise the environment's default,
    /// falling back to local.
    pub fn resolve(api_url: Option<String>, environment: Option<String>) -> Self {
        if let Some(api_url) = api_url.filter(|url| !url.trim().is_empty()) {
            return Self::new(api_url.trim());
        }

        let environment = environment
            .as_deref()
            .and_then(|raw| raw.trim().parse::<Environment>().ok())
            .unwrap_or(Environment::Local);

        Self::new(environment.default_api_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_url_wins() {
        let config = ClientConfig::resolve(
            Some(" https://staging.example.com/api ".into()),
            Some("production".into()),
        );
        assert_eq!(config.api_url, "https://staging.example.com/api");
    }

    #[test]
    fn blank_url_falls_back_to_environment() {
        let config = ClientConfig::resolve(Some("  ".into()), Some("PRODUCTION".into()));
        assert_eq!(config.api_url, PRODUCTION_API_URL);
    }

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("Local".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!(
            "PRODUCTION".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn unknown_or_missing_environment_is_local() {
        assert_eq!(ClientConfig::resolve(None, None), ClientConfig::default());
        assert_eq!(
            ClientConfig::resolve(None, Some("staging".into())).api_url,
            LOCAL_API_URL
        );
    }
}
