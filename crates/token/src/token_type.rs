use std::fmt;

use mt_domain::config::ResolutionConfig;
use mt_domain::error::{Error, Result};

/// What a token points at.  The discriminants are the wire values used in a
/// [`TransferRecord`](crate::TransferRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// A live session, reachable through its remote handle.
    Session = 0,
    /// A service that hosts a session.
    SessionService = 1,
    /// A service that hosts a browsable media library.
    LibraryService = 2,
}

impl TokenType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Whether tokens of this type name a service component.
    pub fn is_service(self) -> bool {
        matches!(self, Self::SessionService | Self::LibraryService)
    }

    /// Registry action a component must advertise to back a token of this
    /// type.  Plain sessions are not discoverable through the registry.
    pub fn service_action(self, config: &ResolutionConfig) -> Result<&str> {
        match self {
            Self::SessionService => Ok(config.session_service_action.as_str()),
            Self::LibraryService => Ok(config.library_service_action.as_str()),
            Self::Session => Err(Error::invalid("invalid type")),
        }
    }
}

impl TryFrom<i32> for TokenType {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Session),
            1 => Ok(Self::SessionService),
            2 => Ok(Self::LibraryService),
            other => Err(Error::invalid(format!("invalid type {other}"))),
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Session => "session",
            Self::SessionService => "session_service",
            Self::LibraryService => "library_service",
        };
        f.write_str(s)
    }
}
