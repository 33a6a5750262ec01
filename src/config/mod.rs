#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{availability_query, CliConfig, Command, LogFormat};
pub use toml_config::{ClinicConfig, DoctorConfig, RosterConfig};
