use thiserror::Error;

/// All errors that can occur in chipin-core.
///
/// The widget itself never fails; these cover the boundary where a host
/// loads contacts and configuration from disk.
#[derive(Debug, Error)]
pub enum ChipinError {
    #[error("Contacts file not found: {0}")]
    ContactsNotFound(String),

    #[error("Unsupported contacts format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Duplicate contact email: {0}")]
    DuplicateContact(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ChipinError {
    /// Exit code the CLI should report for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ContactsNotFound(_) => ExitCode::NotFound,
            Self::UnsupportedFormat(_)
            | Self::DuplicateContact(_)
            | Self::ValidationError(_)
            | Self::Json(_)
            | Self::TomlParse(_) => ExitCode::InvalidInput,
            Self::Io(_) => ExitCode::FileSystemError,
            Self::ConfigError(_) | Self::TomlSerialize(_) => ExitCode::GeneralError,
        }
    }
}

/// Exit codes reported by the `chipin` binary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NotFound = 2,
    InvalidInput = 3,
    FileSystemError = 4,
    Cancelled = 130,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

pub type Result<T> = std::result::Result<T, ChipinError>;
