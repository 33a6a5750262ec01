use crate::core::report::ReportFormat;
use crate::domain::roster::SortKey;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveTime;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "doctor-roster")]
#[command(about = "Query a clinic's doctor roster")]
pub struct CliConfig {
    /// Path to the TOML roster file
    #[arg(short, long, default_value = "roster.toml")]
    pub config: PathBuf,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every doctor on the roster
    List {
        #[arg(long, value_enum, default_value_t = SortKey::Name)]
        sort: SortKey,

        /// Only show doctors with this specialization
        #[arg(long)]
        specialization: Option<String>,
    },
    /// Doctors who can see a patient on a given day and time
    Available {
        #[arg(long)]
        day: String,

        /// Time of day, HH:MM
        #[arg(long)]
        at: String,
    },
    /// Show one doctor's record
    Show { id: String },
    /// Render the whole roster in a machine-readable format
    Export {
        #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,
    },
}

/// Parses the `available` arguments, spelling the day out in full (`"tue"` -> `"Tuesday"`).
pub fn availability_query(day: &str, at: &str) -> Result<(&'static str, NaiveTime)> {
    Ok((
        validation::canonical_weekday("--day", day)?,
        validation::parse_time_of_day("--at", at)?,
    ))
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Available { day, at } => {
                availability_query(day, at)?;
            }
            Command::Show { id } => validation::validate_non_empty_string("id", id)?,
            Command::List { .. } | Command::Export { .. } => {}
        }
        Ok(())
    }
}
