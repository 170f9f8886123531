use thiserror::Error;

/// Result type alias for TCAT operations
pub type Result<T> = std::result::Result<T, TcatError>;

/// Errors that can occur while talking to a TCAT instance
#[derive(Error, Debug)]
pub enum TcatError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required configuration
    #[error("{0}")]
    ConfigMissing(String),

    /// API error with HTTP status
    #[error("TCAT API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// A required query bin field is absent
    #[error("Missing field in query bin: {0}")]
    MissingField(String),

    /// A query bin field could not be coerced to its type
    #[error("Invalid value for query bin field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Operation declared by the API but not supported by this client
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

impl TcatError {
    /// Create an API error from HTTP status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a config missing error with helpful message
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::ConfigMissing(message.into())
    }

    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::ConfigMissing(_) | Self::Toml(_) | Self::TomlSerialize(_) => 78,
            Self::Api { status: 401, .. } | Self::Api { status: 403, .. } => 77,
            Self::Api { .. } | Self::Http(_) => 69,
            Self::Json(_) | Self::MissingField(_) | Self::InvalidField { .. } => 65,
            Self::InvalidArgument(_) => 64,
            Self::NotImplemented(_) => 70,
            Self::Io(_) | Self::Env(_) => 74,
        }
    }
}
