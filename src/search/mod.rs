//! Global search: the matcher over the four collections, the debouncer and
//! the palette controller that ties them to keyboard and pointer input.

pub mod debounce;
pub mod matcher;
pub mod palette;

pub use debounce::Debouncer;
pub use matcher::{group_by_category, initials, Badge, Matcher, ResultGroup, Search, SearchResult};
pub use palette::{Palette, PalettePhase, PointerTarget};
