//! Client-side shell logic of the rental listing app: the search overlay and
//! its cross-view handoff, the install tracker, and the navigation menu.

pub mod catalog;
pub mod config;
pub mod error;
pub mod install;
pub mod models;
pub mod navigation;
pub mod search;
pub mod shell;

pub use config::ShellConfig;
pub use error::{ConfigError, ShellError};
pub use models::{PropertyStatus, Region, SearchFilters};
