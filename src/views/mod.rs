//! View state for the list, filter, form and stats panels.
//!
//! Each piece is a plain value passed in and out of handlers so it can be
//! tested without rendering anything.

pub mod filters;
pub mod form;
pub mod list;
pub mod stats;
pub mod uploads;

pub use filters::{FilterOption, FilterPanel};
pub use form::{FormError, FormFields, FormMode, GameForm};
pub use list::{ListSnapshot, ListState, ListView, Notice};
pub use stats::StatsPanel;
pub use uploads::PendingUploads;
