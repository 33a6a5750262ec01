use crate::domain::doctor::{Doctor, DEFAULT_MAX_PATIENTS_PER_DAY};
use crate::domain::roster::Roster;
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub clinic: Option<ClinicConfig>,
    #[serde(default)]
    pub doctors: Vec<DoctorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicConfig {
    pub name: String,
    pub default_max_patients: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorConfig {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub consultation_fee: Option<f64>,
    pub working_days: Option<Vec<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub max_patients_per_day: Option<i32>,
    pub available: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl RosterConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        tracing::debug!(path = %path.as_ref().display(), "roster config read");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left untouched.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn clinic_name(&self) -> &str {
        self.clinic.as_ref().map(|c| c.name.as_str()).unwrap_or_default()
    }

    pub fn default_max_patients(&self) -> i32 {
        self.clinic
            .as_ref()
            .and_then(|c| c.default_max_patients)
            .unwrap_or(DEFAULT_MAX_PATIENTS_PER_DAY)
    }

    pub fn validate_config(&self) -> Result<()> {
        let clinic = validation::validate_required_field("clinic", &self.clinic)?;
        validation::validate_non_empty_string("clinic.name", &clinic.name)?;
        if let Some(max) = clinic.default_max_patients {
            validation::validate_non_negative("clinic.default_max_patients", max)?;
        }

        validation::validate_unique_ids("doctors.id", self.doctors.iter().map(|d| d.id.as_str()))?;
        for doctor in &self.doctors {
            doctor.validate()?;
        }
        Ok(())
    }

    /// Validates, then builds one record per `[[doctors]]` entry.
    pub fn into_roster(self) -> Result<Roster> {
        self.validate_config()?;
        let default_max = self.default_max_patients();
        let clinic = self.clinic_name().to_string();

        let mut roster = Roster::new();
        for entry in self.doctors {
            roster.add(entry.into_doctor(default_max)?)?;
        }
        tracing::info!(
            clinic = %clinic,
            doctors = roster.len(),
            "roster loaded"
        );
        Ok(roster)
    }
}

impl DoctorConfig {
    fn field(&self, name: &str) -> String {
        format!("doctors[{}].{}", self.id, name)
    }

    pub fn into_doctor(self, default_max_patients: i32) -> Result<Doctor> {
        let start_time = self
            .start_time
            .as_deref()
            .map(|t| validation::parse_time_of_day(&self.field("start_time"), t))
            .transpose()?;
        let end_time = self
            .end_time
            .as_deref()
            .map(|t| validation::parse_time_of_day(&self.field("end_time"), t))
            .transpose()?;
        // Stored under full day names; "Mon" and "Monday" end up identical.
        let working_days = self
            .working_days
            .iter()
            .flatten()
            .map(|day| validation::canonical_weekday(&self.field("working_days"), day))
            .collect::<Result<Vec<_>>>()?;

        let mut doctor = Doctor::with_identity(
            self.id,
            self.name,
            self.specialization,
            self.contact_number.unwrap_or_default(),
        );
        doctor.set_email(self.email.unwrap_or_default());
        doctor.set_consultation_fee(self.consultation_fee.unwrap_or(0.0));
        doctor.set_working_days(&working_days);
        if start_time.is_some() {
            doctor.set_start_time(start_time);
        }
        if end_time.is_some() {
            doctor.set_end_time(end_time);
        }
        doctor.set_max_patients_per_day(self.max_patients_per_day.unwrap_or(default_max_patients));
        doctor.set_available(self.available.unwrap_or(true));

        if doctor.calculate_working_hours() < 0.0 {
            tracing::warn!(
                doctor_id = doctor.doctor_id(),
                "end_time is before start_time; working hours will be negative"
            );
        }
        Ok(doctor)
    }
}

impl Validate for DoctorConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("doctors.id", &self.id)?;
        validation::validate_non_empty_string(&self.field("name"), &self.name)?;
        if let Some(fee) = self.consultation_fee {
            validation::validate_fee(&self.field("consultation_fee"), fee)?;
        }
        if let Some(max) = self.max_patients_per_day {
            validation::validate_non_negative(&self.field("max_patients_per_day"), max)?;
        }
        for day in self.working_days.iter().flatten() {
            validation::validate_weekday(&self.field("working_days"), day)?;
        }
        if let Some(start) = &self.start_time {
            validation::parse_time_of_day(&self.field("start_time"), start)?;
        }
        if let Some(end) = &self.end_time {
            validation::parse_time_of_day(&self.field("end_time"), end)?;
        }
        Ok(())
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
