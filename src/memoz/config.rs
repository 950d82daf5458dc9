use crate::error::{MemozError, Result};
use crate::query::{SortDirection, SortField};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for memoz, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MemozConfig {
    /// Sort field for `list` when none is given.
    #[serde(default)]
    pub default_sort: SortField,

    #[serde(default)]
    pub default_direction: SortDirection,

    /// Expiry for new share links when none is given. `None` never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_expiry_days: Option<i64>,
}

impl MemozConfig {
    pub const KEYS: [&'static str; 3] = ["default_sort", "default_direction", "share_expiry_days"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "default_sort" => Ok(self.default_sort.to_string()),
            "default_direction" => Ok(self.default_direction.to_string()),
            "share_expiry_days" => Ok(self
                .share_expiry_days
                .map(|d| d.to_string())
                .unwrap_or_else(|| "never".to_string())),
            _ => Err(unknown_key(key)),
        }
    }

    /// Sets `key` from its text form. `share_expiry_days` accepts `never`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_sort" => self.default_sort = value.parse().map_err(MemozError::Validation)?,
            "default_direction" => {
                self.default_direction = value.parse().map_err(MemozError::Validation)?
            }
            "share_expiry_days" => {
                self.share_expiry_days = match value.trim() {
                    "never" | "none" | "" => None,
                    days => Some(parse_days(days)?),
                }
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_days(value: &str) -> Result<i64> {
    match value.parse::<i64>() {
        Ok(days) if days >= 0 => Ok(days),
        _ => Err(MemozError::Validation(format!(
            "Expected a number of days, got: {}",
            value
        ))),
    }
}

fn unknown_key(key: &str) -> MemozError {
    MemozError::Validation(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        MemozConfig::KEYS.join(", ")
    ))
}
