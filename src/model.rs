//! Record types for the four searchable collections and the dashboard.
//!
//! Field names follow the camelCase JSON a backend would serve. Anything a
//! backend may leave out is either `Option` or `#[serde(default)]`, so a
//! sparse record deserializes fine and simply never matches on that field.

use crate::error::{Result, SentinelError};
use crate::nav::Route;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Searchable entity kind. Declaration order is the result order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    User,
    Device,
    UserGroup,
    CardTemplate,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::User,
        Category::Device,
        Category::UserGroup,
        Category::CardTemplate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::User => "user",
            Category::Device => "device",
            Category::UserGroup => "user-group",
            Category::CardTemplate => "card-template",
        }
    }

    /// Section heading in the palette
    pub fn label(&self) -> &'static str {
        match self {
            Category::User => "Users",
            Category::Device => "Devices",
            Category::UserGroup => "User Groups",
            Category::CardTemplate => "Card Templates",
        }
    }

    /// Fixed destination page for results of this kind
    pub fn route(&self) -> Route {
        match self {
            Category::User => Route::Users,
            Category::Device => Route::Devices,
            Category::UserGroup => Route::UserGroups,
            Category::CardTemplate => Route::CardTemplates,
        }
    }

    /// Prefix of result ids, e.g. `group-3`
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Category::User => "user",
            Category::Device => "device",
            Category::UserGroup => "group",
            Category::CardTemplate => "template",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SentinelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "users" => Ok(Category::User),
            "device" | "devices" => Ok(Category::Device),
            "user-group" | "user-groups" | "group" | "groups" => Ok(Category::UserGroup),
            "card-template" | "card-templates" | "template" | "templates" => {
                Ok(Category::CardTemplate)
            }
            _ => Err(SentinelError::UnknownCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub user_type: String,
    pub name: String,
    #[serde(default)]
    pub visible_id: String,
    #[serde(default)]
    pub credential_type: String,
    #[serde(default)]
    pub valid_period_start: String,
    #[serde(default)]
    pub valid_period_end: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub user_group: String,
    #[serde(default)]
    pub access_level: String,
    #[serde(default)]
    pub floor_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub firmware_version: String,
    #[serde(default)]
    pub last_sync: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub device_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub access_level: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub card_type: String,
    #[serde(default)]
    pub validity_period: String,
    #[serde(default)]
    pub access_zones: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub usage_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub device_count: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub status: String,
}

/// Kind of access event shown in the dashboard feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessEvent {
    #[serde(rename = "User Activated")]
    UserActivated,
    #[serde(rename = "User Revoked")]
    UserRevoked,
    #[serde(rename = "User Suspended")]
    UserSuspended,
    #[serde(rename = "Access Granted")]
    AccessGranted,
    #[serde(rename = "Door Opened")]
    DoorOpened,
    #[serde(rename = "Failed Attempt")]
    FailedAttempt,
}

impl AccessEvent {
    pub const ALL: [AccessEvent; 6] = [
        AccessEvent::UserActivated,
        AccessEvent::UserRevoked,
        AccessEvent::UserSuspended,
        AccessEvent::AccessGranted,
        AccessEvent::DoorOpened,
        AccessEvent::FailedAttempt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AccessEvent::UserActivated => "User Activated",
            AccessEvent::UserRevoked => "User Revoked",
            AccessEvent::UserSuspended => "User Suspended",
            AccessEvent::AccessGranted => "Access Granted",
            AccessEvent::DoorOpened => "Door Opened",
            AccessEvent::FailedAttempt => "Failed Attempt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAction {
    pub id: String,
    pub event_time: String,
    pub event: AccessEvent,
    pub user_id: String,
    pub user_name: String,
    pub device: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub attendance_percentage: u32,
    pub users_today: u32,
    pub active_users: u32,
    pub pending_users: u32,
    pub devices: u32,
    pub device_groups: u32,
    pub credits: u32,
    pub credits_monthly: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsagePoint {
    pub hour: u8,
    pub value: u64,
}

/// Everything the console displays. Collections are ordered; the matcher
/// relies on that order for its output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub user_groups: Vec<UserGroup>,
    #[serde(default)]
    pub card_templates: Vec<CardTemplate>,
    #[serde(default)]
    pub device_groups: Vec<DeviceGroup>,
    #[serde(default)]
    pub recent_actions: Vec<RecentAction>,
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub usage: Vec<UsagePoint>,
}

impl Dataset {
    /// Read a dataset from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SentinelError::file(path, e))?;
        let dataset: Dataset = serde_json::from_str(&text)?;
        tracing::info!(
            target: "main",
            path = %path.display(),
            users = dataset.users.len(),
            devices = dataset.devices.len(),
            user_groups = dataset.user_groups.len(),
            card_templates = dataset.card_templates.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Write the dataset as pretty JSON
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| SentinelError::file(path, e))?;
        Ok(())
    }

    /// Number of records in one searchable collection
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::User => self.users.len(),
            Category::Device => self.devices.len(),
            Category::UserGroup => self.user_groups.len(),
            Category::CardTemplate => self.card_templates.len(),
        }
    }

    /// Device totals by connection status, compared case-insensitively
    pub fn device_summary(&self) -> DeviceSummary {
        let mut summary = DeviceSummary {
            total: self.devices.len(),
            ..Default::default()
        };
        for device in &self.devices {
            match device.status.to_ascii_lowercase().as_str() {
                "online" => summary.online += 1,
                "offline" => summary.offline += 1,
                "maintenance" => summary.maintenance += 1,
                _ => {}
            }
        }
        summary
    }
}

/// Status strip above the devices table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceSummary {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub maintenance: usize,
}

/// Anything `sentinel list` can print: the searchable kinds plus device groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Searchable(Category),
    DeviceGroups,
}

impl Collection {
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Searchable(category) => category.label(),
            Collection::DeviceGroups => "Device Groups",
        }
    }
}

impl FromStr for Collection {
    type Err = SentinelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "device-group" | "device-groups" => Ok(Collection::DeviceGroups),
            _ => s.parse().map(Collection::Searchable),
        }
    }
}
