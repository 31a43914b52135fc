//! Sentinel - access-control console with a global search palette
//!
//! Pages for users, devices, user groups and card templates over an
//! in-memory dataset, plus a dashboard with a live event feed. The core is
//! the search palette: a capped, category-ordered substring matcher and the
//! controller that debounces typing and drives the result cursor.
//!
//! # Example
//!
//! ```
//! use sentinel::{CategoryCaps, Dataset, Matcher};
//! use std::sync::Arc;
//!
//! let matcher = Matcher::new(Arc::new(Dataset::sample()), CategoryCaps::default());
//! let results = matcher.search("room");
//! for hit in &results {
//!     println!("{} {} - {}", hit.category, hit.title, hit.subtitle);
//! }
//! assert!(results.len() <= 10);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod feed;
pub mod logging;
pub mod model;
pub mod nav;
pub mod search;
pub mod tui;

// Re-export main types
pub use config::{AppConfig, CategoryCaps};
pub use error::{Result, SentinelError};
pub use feed::{EventFeed, EventGenerator, FeedEvent, FeedProducer, SharedFeed};
pub use model::{
    AccessEvent, CardTemplate, Category, Collection, DashboardStats, Dataset, Device,
    DeviceGroup, DeviceSummary, RecentAction, UsagePoint, User, UserGroup,
};
pub use nav::{Navigator, Route, Router};
pub use search::{
    group_by_category, Badge, Debouncer, Matcher, Palette, PalettePhase, PointerTarget,
    ResultGroup, Search, SearchResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
