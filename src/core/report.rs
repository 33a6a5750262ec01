use crate::domain::doctor::Doctor;
use crate::utils::error::{RosterError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    Csv,
    Tsv,
    Json,
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    id: &'a str,
    name: &'a str,
    specialization: &'a str,
    contact_number: &'a str,
    email: &'a str,
    consultation_fee: String,
    available: bool,
    working_days: String,
    start_time: String,
    end_time: String,
    working_hours: f64,
    patients: i32,
    max_patients: i32,
}

impl<'a> From<&'a Doctor> for ReportRow<'a> {
    fn from(doctor: &'a Doctor) -> Self {
        let time = |t: Option<chrono::NaiveTime>| {
            t.map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default()
        };
        Self {
            id: doctor.doctor_id(),
            name: doctor.name(),
            specialization: doctor.specialization(),
            contact_number: doctor.contact_number(),
            email: doctor.email(),
            consultation_fee: format!("{:.2}", doctor.consultation_fee()),
            available: doctor.is_available(),
            working_days: doctor.working_days().join(";"),
            start_time: time(doctor.start_time()),
            end_time: time(doctor.end_time()),
            working_hours: doctor.calculate_working_hours(),
            patients: doctor.current_patient_count(),
            max_patients: doctor.max_patients_per_day(),
        }
    }
}

pub fn render<'a, I>(doctors: I, format: ReportFormat) -> Result<String>
where
    I: IntoIterator<Item = &'a Doctor>,
{
    match format {
        ReportFormat::Csv => render_delimited(doctors, b','),
        ReportFormat::Tsv => render_delimited(doctors, b'\t'),
        ReportFormat::Json => {
            let doctors: Vec<&Doctor> = doctors.into_iter().collect();
            Ok(serde_json::to_string_pretty(&doctors)?)
        }
    }
}

fn render_delimited<'a, I>(doctors: I, delimiter: u8) -> Result<String>
where
    I: IntoIterator<Item = &'a Doctor>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    let mut rows = 0usize;
    for doctor in doctors {
        writer.serialize(ReportRow::from(doctor))?;
        rows += 1;
    }
    tracing::debug!(rows, "report rendered");

    let bytes = writer
        .into_inner()
        .map_err(|e| RosterError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        RosterError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
