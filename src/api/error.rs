use std::error::Error;
use std::fmt;
use std::io;

/// API errors with user-friendly messages.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (connection, timeout, DNS)
    Network(String),
    /// HTTP error response (4xx, 5xx)
    HttpStatus(u16, String),
    /// Failed to parse response
    Parse(String),
    /// A wrapped call blew up; `message` is the caller's description of the call.
    Call {
        message: String,
        source: Box<dyn Error + Send + Sync>,
    },
}

impl ApiError {
    pub fn call(message: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        Self::Call {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Returns a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(details) => {
                if details.contains("timed out") {
                    "Request timed out. Please try again.".into()
                } else if details.contains("dns") || details.contains("resolve") {
                    "Network error: Could not reach server.".into()
                } else {
                    format!("Network error: {details}")
                }
            }
            Self::HttpStatus(429, _) => "Rate limited. Please wait a moment.".into(),
            Self::HttpStatus(404, _) => "News feed not found.".into(),
            Self::HttpStatus(500..=599, _) => "Server error. Please try again later.".into(),
            Self::HttpStatus(code, msg) => format!("HTTP error {code}: {msg}"),
            Self::Parse(details) => format!("Failed to parse response: {details}"),
            Self::Call { message, .. } => message.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Call { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for ApiError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut => Self::Network("request timed out".into()),
            io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
                Self::Network("connection failed".into())
            }
            io::ErrorKind::InvalidData => Self::Parse(err.to_string()),
            _ => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
