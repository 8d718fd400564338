use thiserror::Error;

#[derive(Error, Debug)]
pub enum PetFriendsError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

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

    #[error("Cannot attach photo {path}: {message}")]
    PhotoError { path: String, message: String },

    #[error("{message}")]
    PreconditionFailed { message: String },

    #[error("[{scenario}] assertion failed: {message}")]
    AssertionFailed { scenario: String, message: String },

    #[error("Unexpected response (HTTP {status}): {message}")]
    UnexpectedResponse { status: u16, message: String },
}

/// 錯誤嚴重程度，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PetFriendsError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            message: message.into(),
        }
    }

    pub fn assertion(scenario: &str, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            scenario: scenario.to_string(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AssertionFailed { .. } | Self::PreconditionFailed { .. } => ErrorSeverity::Low,
            Self::Http(_) | Self::UnexpectedResponse { .. } => ErrorSeverity::Medium,
            Self::PhotoError { .. } | Self::Serialization(_) => ErrorSeverity::High,
            Self::Io(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => {
                "The PetFriends service did not answer in time".to_string()
            }
            Self::Http(e) if e.is_connect() => {
                "Could not connect to the PetFriends service, check base_url".to_string()
            }
            Self::MissingConfigError { field } => {
                format!("Setting `{}` is required (config file or environment)", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting `{}` is invalid: {}", field, reason)
            }
            Self::PhotoError { path, .. } => {
                format!("Photo fixture {} is missing or unreadable", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PetFriendsError>;
