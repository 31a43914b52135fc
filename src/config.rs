//! Application configuration
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change.

use crate::error::{Result, SentinelError};
use crate::model::Category;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-category ceiling on palette results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryCaps {
    pub users: usize,
    pub devices: usize,
    pub user_groups: usize,
    pub card_templates: usize,
}

impl Default for CategoryCaps {
    fn default() -> Self {
        Self {
            users: 3,
            devices: 3,
            user_groups: 2,
            card_templates: 2,
        }
    }
}

impl CategoryCaps {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::User => self.users,
            Category::Device => self.devices,
            Category::UserGroup => self.user_groups,
            Category::CardTemplate => self.card_templates,
        }
    }

    /// Upper bound on a whole result set
    pub fn total(&self) -> usize {
        self.users + self.devices + self.user_groups + self.card_templates
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Quiet period before the palette runs a search
    pub debounce_ms: u64,
    /// Result caps per category
    pub caps: CategoryCaps,
    /// UI loop tick
    pub tick_rate_ms: u64,
    /// Seconds between generated dashboard events
    pub feed_interval_secs: u64,
    /// Events kept in the dashboard feed
    pub feed_capacity: usize,
    /// Start with the feed running
    pub feed_live: bool,
    /// Log filter used when `SENTINEL_LOG` is unset
    pub log_level: String,
    /// Dataset file; the built-in sample is used when absent
    pub data_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            caps: CategoryCaps::default(),
            tick_rate_ms: 50,
            feed_interval_secs: 15,
            feed_capacity: 50,
            feed_live: true,
            log_level: "info".to_string(),
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Load a JSON config file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SentinelError::file(path, e))?;
        let config: AppConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the file at `path` when one is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(SentinelError::Config("tickRateMs must be greater than 0".into()));
        }
        if self.feed_interval_secs == 0 {
            return Err(SentinelError::Config(
                "feedIntervalSecs must be greater than 0".into(),
            ));
        }
        if self.feed_capacity == 0 {
            return Err(SentinelError::Config("feedCapacity must be greater than 0".into()));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn feed_interval(&self) -> Duration {
        Duration::from_secs(self.feed_interval_secs)
    }
}
