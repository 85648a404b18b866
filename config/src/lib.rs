//! Ghost Configuration
//!
//! Shared configuration crate for Ghost SDK components.
//!
//! Handles loading configuration from:
//! 1. GHOST_CONFIG env var (explicit path)
//! 2. ./config.toml (current directory)
//! 3. ~/.ghost/config.toml (user home)
//!
//! Environment variables take precedence over TOML config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::{env, fs};

/// Global config instance for convenience access
pub static GLOBAL_CONFIG: OnceLock<GhostConfig> = OnceLock::new();

const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_DIR_NAME: &str = ".ghost";

const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
const DEFAULT_PROGRAM_ID: &str = "GhostPrivacy11111111111111111111111111111111";
const DEFAULT_SUBMIT_ADDR: &str = "127.0.0.1:8547";

/// Root configuration structure (matches TOML layout)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GhostConfig {
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub program: ProgramConfig,
    #[serde(default)]
    pub prover: ProverConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}

/// RPC / submission endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    #[serde(default = "default_rpc_url")]
    pub url: String,
    /// UDP endpoint the submitter sends datagrams to
    #[serde(default = "default_submit_addr")]
    pub submit_addr: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.into(),
            submit_addr: DEFAULT_SUBMIT_ADDR.into(),
        }
    }
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.into()
}

fn default_submit_addr() -> String {
    DEFAULT_SUBMIT_ADDR.into()
}

/// On-chain program configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Ghost program id. Kept as an opaque string: parsing it into a
    /// chain-specific key type is the submission collaborator's concern.
    #[serde(default = "default_program_id")]
    pub id: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_PROGRAM_ID.into(),
        }
    }
}

fn default_program_id() -> String {
    DEFAULT_PROGRAM_ID.into()
}

/// Prover configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProverConfig {
    #[serde(default)]
    pub mode: ProverMode,
}

/// Which proof backend the client wires in
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProverMode {
    /// Hash stand-in proofs (the only backend shipped here)
    #[default]
    Mock,
    /// A real proving service configured out of band
    External,
}

/// Feature flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default)]
    pub dev_mode: bool,
}

/// Set field from env var if present
fn env_string(key: &str, field: &mut String) {
    if let Ok(v) = env::var(key) {
        *field = v;
    }
}

/// Check if env var is set to a truthy value ("1" or "true")
fn env_bool(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl GhostConfig {
    /// Load configuration from config file with env var overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                log::info!("Loading config from: {}", path.display());
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            None => {
                log::info!("No config file found, using defaults and environment variables");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Find the config file path
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check GHOST_CONFIG env var
        if let Ok(path) = env::var("GHOST_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check ./config.toml (current directory)
        let local_path = PathBuf::from(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        // 3. Check ~/.ghost/config.toml
        dirs::home_dir()
            .map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .filter(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        env_string("GHOST_RPC_URL", &mut self.rpc.url);
        env_string("GHOST_SUBMIT_ADDR", &mut self.rpc.submit_addr);
        env_string("GHOST_PROGRAM_ID", &mut self.program.id);

        if let Ok(v) = env::var("GHOST_PROVER_MODE") {
            self.prover.mode = match v.to_ascii_lowercase().as_str() {
                "external" => ProverMode::External,
                _ => ProverMode::Mock,
            };
        }

        if let Some(v) = env_bool("DEV_MODE") {
            self.features.dev_mode = v;
        }
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Generate a sample config file
    pub fn generate_sample() -> String {
        let mut sample = Self::default();
        sample.features.dev_mode = true;
        toml::to_string_pretty(&sample).unwrap_or_default()
    }

    /// Get the global config instance, initializing it if necessary.
    ///
    /// This is the recommended way to access config in most code.
    /// Falls back to defaults if loading fails.
    pub fn global() -> &'static GhostConfig {
        GLOBAL_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                log::warn!("Failed to load config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Try to get the global config instance.
    ///
    /// Returns `None` if config hasn't been initialized yet.
    pub fn try_global() -> Option<&'static GhostConfig> {
        GLOBAL_CONFIG.get()
    }

    /// Initialize the global config with a specific instance.
    ///
    /// Returns `Err(config)` if already initialized.
    pub fn set_global(config: GhostConfig) -> Result<(), GhostConfig> {
        GLOBAL_CONFIG.set(config)
    }
}

/// Shorthand for `GhostConfig::global()`.
#[inline]
pub fn global_config() -> &'static GhostConfig {
    GhostConfig::global()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GhostConfig::default();
        assert_eq!(config.rpc.url, DEFAULT_RPC_URL);
        assert_eq!(config.program.id, DEFAULT_PROGRAM_ID);
        assert_eq!(config.prover.mode, ProverMode::Mock);
        assert!(!config.features.dev_mode);
    }

    #[test]
    fn test_generate_sample() {
        let sample = GhostConfig::generate_sample();
        assert!(sample.contains("[rpc]"));
        assert!(sample.contains("[program]"));
        assert!(sample.contains("[prover]"));
        assert!(sample.contains("[features]"));
    }

    #[test]
    fn test_parse_sample() {
        let sample = GhostConfig::generate_sample();
        let parsed: GhostConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.rpc.url, DEFAULT_RPC_URL);
        assert!(parsed.features.dev_mode);
    }
}
