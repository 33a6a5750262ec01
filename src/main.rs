use anyhow::Context;
use clap::Parser;
use doctor_roster::config::{availability_query, Command, LogFormat};
use doctor_roster::utils::{logger, validation::Validate};
use doctor_roster::{render, CliConfig, Doctor, Roster, RosterConfig, RosterError};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Text => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting doctor-roster");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let roster = match RosterConfig::from_file(&config.config).and_then(RosterConfig::into_roster)
    {
        Ok(roster) => roster,
        Err(e) => {
            tracing::error!("Failed to load roster '{}': {}", config.config.display(), e);
            exit_with(&e);
        }
    };

    run(&config.command, &roster)
        .with_context(|| format!("command failed for roster '{}'", config.config.display()))
}

fn run(command: &Command, roster: &Roster) -> anyhow::Result<()> {
    match command {
        Command::List {
            sort,
            specialization,
        } => {
            print_doctors(&roster.list(specialization.as_deref(), *sort));
        }
        Command::Available { day, at } => {
            let (day, at) = availability_query(day, at)?;
            let doctors = roster.available_at(day, at);
            tracing::info!(day = %day, at = %at, matches = doctors.len(), "availability query");
            print_doctors(&doctors);
        }
        Command::Show { id } => {
            let doctor = roster.find(id).ok_or_else(|| RosterError::DoctorNotFound {
                doctor_id: id.clone(),
            })?;
            println!("{}", doctor);
            println!("Working hours per day: {:.2}", doctor.calculate_working_hours());
        }
        Command::Export { format } => {
            print!("{}", render(roster, *format)?);
        }
    }
    Ok(())
}

fn print_doctors(doctors: &[&Doctor]) {
    if doctors.is_empty() {
        println!("No matching doctors.");
        return;
    }
    for doctor in doctors {
        println!("{}", doctor);
    }
}

fn exit_with(e: &RosterError) -> ! {
    tracing::error!("{}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}
