use std::fmt;

use thiserror::Error;

/// Error returned by every network-backed operation. `Display` yields the
/// user-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// HTTP status reported by the service, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FailureKind::HttpStatus(code) => Some(code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Login rejected the username/password pair.
    InvalidCredentials,
    /// Signup asked for a username that already exists.
    UsernameTaken,
    /// Login failed for any other reason.
    LoginFailed,
    /// Signup failed for any other reason.
    SignupFailed,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    InvalidUrl,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidCredentials => write!(f, "invalid credentials"),
            FailureKind::UsernameTaken => write!(f, "username taken"),
            FailureKind::LoginFailed => write!(f, "login failed"),
            FailureKind::SignupFailed => write!(f, "signup failed"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
        }
    }
}
