//! Configuration Management
//!
//! This module resolves the three connection settings (base URL, username,
//! password) and manages stored connection profiles.
//!
//! # Resolution Precedence
//! 1. Explicit values (constructor arguments / CLI flags, highest priority)
//! 2. Process environment (`MATHESAR_BASE_URL`, `MATHESAR_USERNAME`, `MATHESAR_PASSWORD`)
//! 3. A stored profile, only when one is requested or a default is set
//!
//! A setting supplied by none of these is a configuration error.
//!
//! # Profile Locations
//! - Local: `.mathesar/profiles.json` (per-project)
//! - Global: `~/.config/mathesar-client/profiles.json` (per-user)
//!
//! Local profiles override global profiles with the same name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::{ClientError, Result};

/// Environment variable holding the base URL
pub const ENV_BASE_URL: &str = "MATHESAR_BASE_URL";
/// Environment variable holding the username
pub const ENV_USERNAME: &str = "MATHESAR_USERNAME";
/// Environment variable holding the password
pub const ENV_PASSWORD: &str = "MATHESAR_PASSWORD";

/// Path of the JSON-RPC endpoint, relative to the base URL
pub const RPC_ENDPOINT_PATH: &str = "api/rpc/v0/";

/// Resolved connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the server (e.g. `https://mathesar.example.com/`)
    pub base_url: String,

    /// Username for basic authentication
    pub username: String,

    /// Password for basic authentication
    /// WARNING: Sensitive data, do not log or include in error messages
    pub password: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Explicitly supplied settings; unset fields fall through to the next source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ClientConfig {
    /// Create a config from explicit values
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self { base_url: base_url.into(), username: username.into(), password: password.into() }
    }

    /// Resolve settings from explicit values, then the environment
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        resolve_with(overrides, None, |key| std::env::var(key).ok())
    }

    /// Resolve settings from the environment only
    pub fn from_env() -> Result<Self> {
        Self::resolve(ConfigOverrides::default())
    }

    /// Full URL of the JSON-RPC endpoint
    ///
    /// Uses RFC 3986 reference resolution, so a base URL without a trailing
    /// slash has its last path segment replaced.
    pub fn endpoint(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url).map_err(|e| {
            ClientError::config_error(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;
        base.join(RPC_ENDPOINT_PATH)
            .map_err(|e| ClientError::config_error(format!("Could not build endpoint URL: {e}")))
    }
}

/// Resolve settings from explicit values, the environment, then a stored profile
///
/// `profile` selects a named profile; `None` falls back to the registry's
/// default profile if one is set. Profile files are only read when a
/// profile is named or a setting is still missing.
pub fn resolve_with_profile(overrides: ConfigOverrides, profile: Option<&str>) -> Result<ClientConfig> {
    resolve_lazily(overrides, profile, |key| std::env::var(key).ok(), load_with_precedence)
}

fn resolve_lazily(
    overrides: ConfigOverrides,
    profile: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    load: impl FnOnce() -> Result<ProfileRegistry>,
) -> Result<ClientConfig> {
    if profile.is_none() {
        if let Ok(config) = resolve_with(overrides.clone(), None, &env) {
            return Ok(config);
        }
    }

    let registry = load()?;
    let stored = match profile {
        Some(name) => Some(registry.profiles.get(name).ok_or_else(|| {
            let mut available: Vec<_> = registry.profiles.keys().cloned().collect();
            available.sort();
            ClientError::config_error(format!(
                "Profile '{name}' not found. Available profiles: {available:?}"
            ))
        })?),
        None => registry.default.as_ref().and_then(|name| registry.profiles.get(name)),
    };

    resolve_with(overrides, stored, env)
}

fn resolve_with(
    overrides: ConfigOverrides,
    profile: Option<&StoredProfile>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig> {
    let given = |explicit: Option<String>, key: &str| {
        explicit
            .filter(|v| !v.is_empty())
            .or_else(|| env(key).filter(|v| !v.is_empty()))
    };
    let missing = |key: &str| {
        ClientError::config_error(format!("Missing setting: pass it explicitly or set {key}"))
    };

    let base_url = given(overrides.base_url, ENV_BASE_URL)
        .or_else(|| profile.map(|p| p.base_url.clone()))
        .ok_or_else(|| missing(ENV_BASE_URL))?;
    let username = given(overrides.username, ENV_USERNAME)
        .or_else(|| profile.map(|p| p.username.clone()))
        .ok_or_else(|| missing(ENV_USERNAME))?;
    let password = match given(overrides.password, ENV_PASSWORD) {
        Some(password) => password,
        None => profile
            .map(|p| p.password_with(&env))
            .transpose()?
            .flatten()
            .ok_or_else(|| missing(ENV_PASSWORD))?,
    };

    Ok(ClientConfig { base_url, username, password })
}

/// Stored connection profile
///
/// The password can be kept directly or referenced through an environment
/// variable named by `password_env`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    pub base_url: String,

    pub username: String,

    /// WARNING: Sensitive data, prefer `password_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Environment variable name for password (if not storing password directly)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,
}

impl StoredProfile {
    /// Stored password, read through `password_env` when one is named
    fn password_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<Option<String>> {
        match &self.password_env {
            Some(env_var) => env(env_var.as_str()).map(Some).ok_or_else(|| {
                ClientError::config_error(format!(
                    "Environment variable {env_var} not found for password"
                ))
            }),
            None => Ok(self.password.clone()),
        }
    }
}

/// Profile registry as stored in a profiles file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRegistry {
    /// Named profiles
    #[serde(default)]
    pub profiles: HashMap<String, StoredProfile>,

    /// Name of the default profile (must exist in profiles map)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl ProfileRegistry {
    /// Merge `other` into `self`; entries and default from `other` win
    fn merge(&mut self, other: Self) {
        self.profiles.extend(other.profiles);
        if other.default.is_some() {
            self.default = other.default;
        }
    }
}

/// Profile file location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Local profiles: `.mathesar/profiles.json`
    Local,
    /// Global profiles: `~/.config/mathesar-client/profiles.json`
    Global,
}

/// Get path to local profiles file (`.mathesar/profiles.json`)
pub fn local_config_path() -> Result<PathBuf> {
    let current_dir = std::env::current_dir().map_err(|e| {
        ClientError::config_error(format!("Could not determine current directory: {e}"))
    })?;

    Ok(current_dir.join(".mathesar").join("profiles.json"))
}

/// Get path to global profiles file (`~/.config/mathesar-client/profiles.json`)
pub fn global_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ClientError::config_error("Could not determine user config directory"))?;

    Ok(config_dir.join("mathesar-client").join("profiles.json"))
}

/// Path for a config location
pub fn config_path(location: ConfigLocation) -> Result<PathBuf> {
    match location {
        ConfigLocation::Local => local_config_path(),
        ConfigLocation::Global => global_config_path(),
    }
}

/// Load a profile registry; a missing file is an empty registry
pub fn load_registry(path: &Path) -> Result<ProfileRegistry> {
    if !path.exists() {
        return Ok(ProfileRegistry::default());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| ClientError::config_error(format!("Could not read profiles file: {e}")))?;

    serde_json::from_str(&contents)
        .map_err(|e| ClientError::config_error(format!("Invalid profiles file format: {e}")))
}

/// Save a profile registry, creating parent directories as needed
pub fn save_registry(path: &Path, registry: &ProfileRegistry) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ClientError::config_error(format!("Could not create config directory: {e}"))
        })?;
    }

    let contents = serde_json::to_string_pretty(registry)
        .map_err(|e| ClientError::config_error(format!("Could not serialize profiles: {e}")))?;

    fs::write(path, contents)
        .map_err(|e| ClientError::config_error(format!("Could not write profiles file: {e}")))
}

/// Load global then local profiles, local entries taking precedence
pub fn load_with_precedence() -> Result<ProfileRegistry> {
    let mut merged = load_registry(&global_config_path()?)?;
    merged.merge(load_registry(&local_config_path()?)?);
    Ok(merged)
}

/// Save a profile into the file at `location`
///
/// The first profile saved to a file becomes that file's default.
pub fn save_profile(name: &str, profile: StoredProfile, location: ConfigLocation) -> Result<()> {
    let path = config_path(location)?;
    let mut registry = load_registry(&path)?;
    insert_profile(&mut registry, name, profile);
    save_registry(&path, &registry)
}

fn insert_profile(registry: &mut ProfileRegistry, name: &str, profile: StoredProfile) {
    let is_first = registry.profiles.is_empty();
    registry.profiles.insert(name.to_string(), profile);
    if is_first {
        registry.default = Some(name.to_string());
    }
}

/// List profile names with their base URLs, sorted by name
pub fn list_profiles() -> Result<Vec<(String, String)>> {
    let registry = load_with_precedence()?;
    let mut profiles: Vec<_> = registry
        .profiles
        .into_iter()
        .map(|(name, stored)| (name, stored.base_url))
        .collect();
    profiles.sort();
    Ok(profiles)
}
