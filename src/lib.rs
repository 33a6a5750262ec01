pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::RosterConfig;
pub use crate::core::report::{render, ReportFormat};
pub use crate::domain::doctor::Doctor;
pub use crate::domain::roster::{Roster, SortKey};
pub use crate::utils::error::{Result, RosterError};
