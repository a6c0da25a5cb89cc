use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Explorer backend operations
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Amount decoding
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Explorer backend error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never produced a response (connection refused, timeout, TLS)
    #[error("Transport error on {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// Backend answered with a non-success HTTP status
    #[error("HTTP {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// Response body does not match the expected record shape
    #[error("Response from {endpoint} failed validation: {message}")]
    Validation { endpoint: String, message: String },

    /// Payload carried an explicit failure flag
    #[error("Application error from {endpoint}: {message}")]
    Application { endpoint: String, message: String },

    /// Base URL or path could not be assembled into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the single-request layer may retry this failure
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Amount codec error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// No hex digits after stripping the optional prefix
    #[error("Empty hex amount")]
    Empty,

    /// Input contains characters outside [0-9a-fA-F]
    #[error("Invalid hex amount: {0}")]
    InvalidHex(String),

    /// Little-endian input must be whole bytes
    #[error("Odd number of hex digits for little-endian amount: {0}")]
    OddLength(String),

    /// Value does not fit the display decimal
    #[error("Amount {0} exceeds display precision")]
    Overflow(String),
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for explorer backend operations
pub type ApiResult<T> = Result<T, ApiError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
