//! Base URL resolution.
//!
//! The books API normally runs on the developer's machine. A desktop client
//! reaches it over loopback; an Android emulator reaches the same host
//! through the `10.0.2.2` alias. Precedence, highest first: explicit value,
//! `BIBLIOTECA_BASE_URL`, the default for the selected target.

use std::str::FromStr;

use thiserror::Error;

pub const DESKTOP_BASE_URL: &str = "http://localhost:8080";
pub const EMULATOR_BASE_URL: &str = "http://10.0.2.2:8080";

pub const BASE_URL_VAR: &str = "BIBLIOTECA_BASE_URL";
pub const TARGET_VAR: &str = "BIBLIOTECA_TARGET";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown target {0:?}, expected \"desktop\" or \"emulator\"")]
    UnknownTarget(String),
}

/// Where the client runs relative to the API host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    #[default]
    Desktop,
    Emulator,
}

impl Target {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Target::Desktop => DESKTOP_BASE_URL,
            Target::Emulator => EMULATOR_BASE_URL,
        }
    }
}

impl FromStr for Target {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" | "localhost" => Ok(Target::Desktop),
            "emulator" | "android" => Ok(Target::Emulator),
            other => Err(ConfigError::UnknownTarget(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_target(Target::Desktop)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn for_target(target: Target) -> Self {
        Self::new(target.default_base_url())
    }

    /// Resolve from the process environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(None, None, |key| std::env::var(key).ok())
    }

    /// Resolve with optional explicit overrides. `lookup` reads environment
    /// variables; blank values count as unset.
    pub fn resolve<F>(
        base_url: Option<&str>,
        target: Option<Target>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            return Ok(Self::new(url.trim()));
        }
        if let Some(url) = lookup(BASE_URL_VAR) {
            return Ok(Self::new(url.trim()));
        }
        let target = match target {
            Some(target) => target,
            None => lookup(TARGET_VAR)
                .map(|t| t.parse::<Target>())
                .transpose()?
                .unwrap_or_default(),
        };
        Ok(Self::for_target(target))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_desktop() {
        let config = ClientConfig::resolve(None, None, env(&[])).unwrap();
        assert_eq!(config.base_url, DESKTOP_BASE_URL);
    }

    #[test]
    fn target_variable_selects_emulator() {
        let config = ClientConfig::resolve(None, None, env(&[(TARGET_VAR, "Emulator")])).unwrap();
        assert_eq!(config.base_url, EMULATOR_BASE_URL);
    }

    #[test]
    fn base_url_variable_beats_target() {
        let config = ClientConfig::resolve(
            None,
            Some(Target::Emulator),
            env(&[(BASE_URL_VAR, "http://192.168.1.20:8080")]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://192.168.1.20:8080");
    }

    #[test]
    fn explicit_value_beats_everything() {
        let config = ClientConfig::resolve(
            Some("http://api.local"),
            Some(Target::Emulator),
            env(&[(BASE_URL_VAR, "http://other"), (TARGET_VAR, "desktop")]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://api.local");
    }

    #[test]
    fn explicit_target_beats_target_variable() {
        let config =
            ClientConfig::resolve(None, Some(Target::Emulator), env(&[(TARGET_VAR, "desktop")]))
                .unwrap();
        assert_eq!(config.base_url, EMULATOR_BASE_URL);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config =
            ClientConfig::resolve(Some("  "), None, env(&[(BASE_URL_VAR, ""), (TARGET_VAR, " ")]))
                .unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn unknown_target_is_an_error() {
        let err = ClientConfig::resolve(None, None, env(&[(TARGET_VAR, "ios")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownTarget("ios".to_string()));
    }
}
