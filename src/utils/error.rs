use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid exclude pattern: {0}")]
    ExcludePatternError(#[from] ignore::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Lint command `{command}` failed with exit code {code:?}")]
    LintError { command: String, code: Option<i32> },

    #[error("Could not start lint command `{command}`: {source}")]
    LintSpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Filesystem,
    Data,
    Lint,
}

impl ComponentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ComponentError::ConfigError { .. }
            | ComponentError::MissingConfigError { .. }
            | ComponentError::InvalidConfigValueError { .. }
            | ComponentError::ExcludePatternError(_) => ErrorCategory::Configuration,
            ComponentError::ApiError(_) | ComponentError::ApiStatusError { .. } => {
                ErrorCategory::Network
            }
            ComponentError::IoError(_) | ComponentError::ZipError(_) => ErrorCategory::Filesystem,
            ComponentError::SerializationError(_)
            | ComponentError::InvalidPattern(_)
            | ComponentError::ValidationError { .. } => ErrorCategory::Data,
            ComponentError::LintError { .. } | ComponentError::LintSpawnError { .. } => {
                ErrorCategory::Lint
            }
        }
    }

    /// CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Network => 3,
            ErrorCategory::Filesystem => 4,
            ErrorCategory::Data => 5,
            ErrorCategory::Lint => 6,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ComponentError::MissingConfigError { .. } => {
                "Set the missing value in dc-component.toml or the environment (e.g. API_KEY)"
            }
            ComponentError::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check that API_KEY holds a valid platform token"
            }
            ComponentError::ApiStatusError { .. } | ComponentError::ApiError(_) => {
                "Check API_URL and your network connection, then run the command again"
            }
            ComponentError::LintError { .. } => {
                "Fix the reported lint issues or rerun with --skip-lint"
            }
            ComponentError::LintSpawnError { .. } => {
                "Install the linter or change [lint].commands in dc-component.toml"
            }
            ComponentError::ExcludePatternError(_) => {
                "Fix the [package].exclude entries in dc-component.toml"
            }
            _ => "Run again with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, ComponentError>;
