use serde::{Deserialize, Serialize};
use split_domain::{RoundingMode, RoundingPolicy, SettlementModel};
use std::path::PathBuf;

use crate::ConfigError;

/// Largest scale a decimal amount can carry.
pub const MAX_DISPLAY_SCALE: u32 = 28;

/// Stores user-configurable preferences for balancing and presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub settlement_model: SettlementModel,
    #[serde(default = "Config::default_display_scale")]
    pub display_scale: u32,
    #[serde(default)]
    pub rounding_mode: RoundingMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for group snapshots. Defaults to `~/Documents/SplitLedger`.
    pub default_group_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            settlement_model: SettlementModel::default(),
            display_scale: Self::default_display_scale(),
            rounding_mode: RoundingMode::default(),
            default_group_root: None,
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_display_scale() -> u32 {
        2
    }

    /// Presentation rounding derived from `display_scale` and `rounding_mode`.
    pub fn rounding_policy(&self) -> RoundingPolicy {
        RoundingPolicy::new(self.display_scale, self.rounding_mode)
    }

    /// Rejects values the balance engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_scale > MAX_DISPLAY_SCALE {
            return Err(ConfigError::Invalid(format!(
                "display_scale {} exceeds {}",
                self.display_scale, MAX_DISPLAY_SCALE
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must not be empty".into()));
        }
        Ok(())
    }

    pub fn resolve_default_group_root(&self) -> PathBuf {
        if let Some(path) = &self.default_group_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("SplitLedger")
    }
}
