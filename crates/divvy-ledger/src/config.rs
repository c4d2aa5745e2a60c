//! # Ledger Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DIVVY_RESIDUAL_POLICY=reject                                       │
//! │     DIVVY_MAX_PARTICIPANTS=20                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/divvy/ledger.toml (Linux)                                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     accept residuals, 100 participants, 100-char names                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # ledger.toml
//! [limits]
//! max_participants_per_expense = 100
//! max_name_length = 100
//!
//! [rounding]
//! residual_policy = "accept"  # accept | reject
//!
//! [display]
//! currency_symbol = "₹"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use divvy_core::{DEFAULT_MAX_NAME_LENGTH, DEFAULT_MAX_PARTICIPANTS};

use crate::error::{LedgerError, LedgerResult};

// =============================================================================
// Residual Policy
// =============================================================================

/// What the ledger does when Percent shares, rounded one by one, do not
/// add back up to the expense total.
///
/// ```text
/// 1.00 split {33.33%, 33.33%, 33.33%, 0.01%}
///   → shares 0.33 + 0.33 + 0.33 + 0.00 = 0.99, residual 0.01
///
/// ACCEPT (default): apply the shares as computed, log a warning, report
///                   the residual on the receipt. The payer is simply owed
///                   0.99 instead of 1.00.
/// REJECT:           refuse the expense with RoundingResidual, no changes.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidualPolicy {
    #[default]
    Accept,
    Reject,
}

impl std::fmt::Display for ResidualPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResidualPolicy::Accept => write!(f, "accept"),
            ResidualPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for ResidualPolicy {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accept" | "allow" => Ok(ResidualPolicy::Accept),
            "reject" | "strict" => Ok(ResidualPolicy::Reject),
            other => Err(LedgerError::InvalidConfig(format!(
                "Unknown residual policy: '{}'. Valid options: accept, reject",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Input limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Maximum participants on a single expense.
    #[serde(default = "default_max_participants")]
    pub max_participants_per_expense: usize,

    /// Maximum participant name length, in characters.
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

fn default_max_participants() -> usize {
    DEFAULT_MAX_PARTICIPANTS
}

fn default_max_name_length() -> usize {
    DEFAULT_MAX_NAME_LENGTH
}

impl Default for LimitSettings {
    fn default() -> Self {
        LimitSettings {
            max_participants_per_expense: default_max_participants(),
            max_name_length: default_max_name_length(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundingSettings {
    #[serde(default)]
    pub residual_policy: ResidualPolicy,
}

/// Presentation only; never affects arithmetic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Prefix for amounts in human-readable output.
    #[serde(default)]
    pub currency_symbol: String,
}

// =============================================================================
// Main Ledger Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub limits: LimitSettings,

    #[serde(default)]
    pub rounding: RoundingSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl LedgerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (ledger.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> LedgerResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading ledger config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load ledger config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn save(&self, config_path: Option<PathBuf>) -> LedgerResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| LedgerError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LedgerError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| LedgerError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Ledger config saved");
        Ok(())
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.limits.max_participants_per_expense == 0 {
            return Err(LedgerError::InvalidConfig(
                "max_participants_per_expense must be greater than 0".into(),
            ));
        }

        if self.limits.max_name_length == 0 {
            return Err(LedgerError::InvalidConfig(
                "max_name_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(policy) = std::env::var("DIVVY_RESIDUAL_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding residual policy from environment");
                    self.rounding.residual_policy = parsed;
                }
                Err(_) => warn!(policy = %policy, "Unknown residual policy in environment"),
            }
        }

        if let Ok(max) = std::env::var("DIVVY_MAX_PARTICIPANTS") {
            if let Ok(n) = max.parse::<usize>() {
                debug!(max = n, "Overriding participant limit from environment");
                self.limits.max_participants_per_expense = n;
            }
        }

        if let Ok(symbol) = std::env::var("DIVVY_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "divvy", "divvy")
            .map(|dirs| dirs.config_dir().join("ledger.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn residual_policy(&self) -> ResidualPolicy {
        self.rounding.residual_policy
    }

    pub fn max_participants(&self) -> usize {
        self.limits.max_participants_per_expense
    }

    pub fn max_name_length(&self) -> usize {
        self.limits.max_name_length
    }

    pub fn currency_symbol(&self) -> &str {
        &self.display.currency_symbol
    }
}
