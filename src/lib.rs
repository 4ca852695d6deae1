//! Responsive select group for ratatui applications.
//!
//! A [`SelectGroup`] shows its items as a row of clickable chips when the
//! terminal is wide, folding anything past `max_elements` into an overflow
//! dropdown. On narrow terminals the whole list collapses into a single
//! dropdown. The variant is re-evaluated on every resize event.

pub mod config;
pub mod error;
pub mod events;
pub mod select;
pub mod theme;
pub mod viewport;

pub use events::{ToggleEvent, ToggleNotifier};
pub use select::item::{BadgeVariant, ItemBadge, SelectItem};
pub use select::partition::{partition, trigger_label, Partition, DEFAULT_MAX_ELEMENTS};
pub use select::{EventOutcome, SelectGroup, SelectGroupProps};
pub use viewport::{Layout, Viewport};
