//! Configuration and context management.
//!
//! Handles:
//! - Scaling service endpoint configuration
//! - Per-profile token storage
//! - Current context (profile, region)

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Credentials file name.
const CREDENTIALS_FILE: &str = "credentials.json";

/// Profile used when none is selected by flag or context.
pub const DEFAULT_PROFILE: &str = "default";

/// Get the config directory path.
fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("dev", "fleetcap", "fleetcap")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scaling service endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Current context.
    #[serde(default)]
    pub context: CliContext,
}

fn default_endpoint() -> String {
    std::env::var("FLEETCAP_ENDPOINT").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            context: CliContext::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return default.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join(CONFIG_FILE);

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        write_private(CONFIG_FILE, &contents)
    }
}

/// Current CLI context (selected profile and region).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliContext {
    /// Default credentials profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Default region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Tokens stored per profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsStore {
    #[serde(default)]
    profiles: BTreeMap<String, Credentials>,
}

impl CredentialsStore {
    /// Load credentials from disk, or return an empty store.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join(CREDENTIALS_FILE);

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read credentials from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse credentials from {:?}", path))
    }

    /// Save credentials to disk.
    pub fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        write_private(CREDENTIALS_FILE, &contents)
    }

    /// Get the credentials for a profile.
    pub fn get(&self, profile: &str) -> Option<&Credentials> {
        self.profiles.get(profile)
    }

    /// Store credentials for a profile, replacing any existing ones.
    pub fn insert(&mut self, profile: &str, credentials: Credentials) {
        self.profiles.insert(profile.to_string(), credentials);
    }

    /// Remove a profile's credentials. Returns whether anything was removed.
    pub fn remove(&mut self, profile: &str) -> bool {
        self.profiles.remove(profile).is_some()
    }

    /// Names of all profiles with stored credentials, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }
}

/// Stored credentials for one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Access token.
    pub token: String,

    /// Token expiration time (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(token: String) -> Self {
        Self {
            token,
            expires_at: None,
        }
    }

    /// Check if the token is expired.
    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            chrono::Utc::now() >= expires_at
        } else {
            false
        }
    }
}

/// Write a config file with restrictive permissions.
fn write_private(file_name: &str, contents: &str) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)?;

    let path = dir.join(file_name);

    #[cfg(unix)]
    {
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&path)?;
        file.write_all(contents.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
    }

    Ok(())
}
