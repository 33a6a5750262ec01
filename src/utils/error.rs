use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Doctor '{doctor_id}' is already on the roster")]
    DuplicateDoctor { doctor_id: String },

    #[error("Doctor '{doctor_id}' not found")]
    DoctorNotFound { doctor_id: String },

    #[error("Doctor '{doctor_id}' cannot take more patients today")]
    NoCapacity { doctor_id: String },
}

impl RosterError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            RosterError::IoError(_) => "Could not read or write a file".to_string(),
            RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. }
            | RosterError::MissingConfigError { .. } => {
                format!("The roster configuration is invalid: {}", self)
            }
            RosterError::CsvError(_) | RosterError::SerializationError(_) => {
                "Failed to render the roster report".to_string()
            }
            RosterError::DuplicateDoctor { .. }
            | RosterError::DoctorNotFound { .. }
            | RosterError::NoCapacity { .. } => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RosterError::IoError(_) => "Check that the file exists and is readable",
            RosterError::ConfigValidationError { .. } => "Check the TOML syntax of the roster file",
            RosterError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value in the roster file"
            }
            RosterError::MissingConfigError { .. } => "Add the missing key to the roster file",
            RosterError::CsvError(_) | RosterError::SerializationError(_) => {
                "Try a different export format"
            }
            RosterError::DuplicateDoctor { .. } => "Give every doctor a unique id",
            RosterError::DoctorNotFound { .. } => "Run `list` to see the known doctor ids",
            RosterError::NoCapacity { .. } => {
                "Pick another doctor or raise max_patients_per_day"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
