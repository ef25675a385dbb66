use thiserror::Error;

#[derive(Error, Debug)]
pub enum LadderError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Ladder service returned {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Malformed ladder payload: {message}")]
    PayloadError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Payload,
    Io,
    Configuration,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LadderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LadderError::ApiError(_) => ErrorCategory::Network,
            LadderError::ServiceError { .. } => ErrorCategory::Service,
            LadderError::PayloadError { .. } => ErrorCategory::Payload,
            LadderError::IoError(_) => ErrorCategory::Io,
            LadderError::TemplateError(_) => ErrorCategory::Rendering,
            LadderError::ConfigError { .. }
            | LadderError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // the backend may simply not be up yet
            ErrorCategory::Network | ErrorCategory::Service => ErrorSeverity::Medium,
            ErrorCategory::Payload | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Rendering => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Make sure the ladder backend is running and reachable",
            ErrorCategory::Service => "Check the backend logs; the handle or filters may be rejected",
            ErrorCategory::Payload => "The backend answered with an unexpected shape; check its version",
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Fix the configuration value and try again",
            ErrorCategory::Rendering => "The page template failed; please report this",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LadderError::ApiError(e) if e.is_timeout() => {
                "The ladder request timed out".to_string()
            }
            LadderError::ApiError(_) => "Could not reach the ladder backend".to_string(),
            LadderError::ServiceError { status, .. } => {
                format!("The ladder backend failed with status {}", status)
            }
            LadderError::PayloadError { .. } => {
                "The ladder backend sent data that could not be read".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LadderError>;
