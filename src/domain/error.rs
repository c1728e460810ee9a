use thiserror::Error;

/// Discriminant of [`KeyError`], cheap to copy and compare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Auth,
    Network,
    Server,
    Decode,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Auth => "auth",
            Self::Network => "network",
            Self::Server => "server",
            Self::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// Errors produced by key lifecycle operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authentication error: {message}")]
    Auth { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },
}

impl KeyError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Network { .. } => ErrorKind::Network,
            Self::Server { .. } => ErrorKind::Server,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Human readable message without the category prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Auth { message }
            | Self::Network { message }
            | Self::Server { message, .. }
            | Self::Decode { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let error = KeyError::server(404, "key not found");
        assert_eq!(error.to_string(), "Server error (404): key not found");
        assert_eq!(error.kind(), ErrorKind::Server);
    }

    #[test]
    fn test_auth_error_display() {
        let error = KeyError::auth("session expired");
        assert_eq!(error.to_string(), "Authentication error: session expired");
        assert_eq!(error.message(), "session expired");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Decode.to_string(), "decode");
        assert_eq!(ErrorKind::Validation.to_string(), "validation");
    }
}
