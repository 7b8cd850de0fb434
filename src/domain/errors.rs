use std::fmt;

// Error contract for MindLink API calls. Every variant is recoverable by
// retrying the user action or re-authenticating.
#[derive(Debug)]
pub enum ApiError {
    // No response reached the client: connection refused, DNS, timeout.
    Network(reqwest::Error),
    // The response arrived but its body did not match the expected shape.
    Decode(serde_json::Error),
    // HTTP 401 on the login call specifically.
    InvalidCredentials,
    RegistrationFailed(String),
    LoginFailed(String),
    // Non-success envelope code or HTTP error status with a server message.
    // `status` is absent when the failure was signaled inside a 200 envelope.
    RequestFailed {
        status: Option<u16>,
        message: String,
    },
    // A protected call came back 401; the stored session has been cleared.
    SessionExpired,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(err) => write!(f, "network error: {err}"),
            ApiError::Decode(err) => write!(f, "response decode error: {err}"),
            ApiError::InvalidCredentials => write!(f, "invalid username or password"),
            ApiError::RegistrationFailed(message) => {
                write!(f, "registration failed: {message}")
            }
            ApiError::LoginFailed(message) => write!(f, "login failed: {message}"),
            ApiError::RequestFailed { status, message } => {
                if let Some(status) = status {
                    write!(f, "request failed with status {status}: {message}")
                } else {
                    write!(f, "request failed: {message}")
                }
            }
            ApiError::SessionExpired => write!(f, "session expired"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(err) => Some(err),
            ApiError::Decode(err) => Some(err),
            _ => None,
        }
    }
}
