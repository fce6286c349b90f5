use serde::Serialize;
use std::fmt;

/// The closed set of per-resolver failures a run tolerates.
///
/// Anything that cannot be mapped onto one of these is a
/// [`crate::DomainError`] and terminates the run instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    ConnectTimeout,
    ReadTimeout,
    ConnectionReset,
    ConnectorFailure,
    MalformedWireHeader,
    MalformedLabel,
    JsonDecodeFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Protocol,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::ConnectTimeout,
        ErrorKind::ReadTimeout,
        ErrorKind::ConnectionReset,
        ErrorKind::ConnectorFailure,
        ErrorKind::MalformedWireHeader,
        ErrorKind::MalformedLabel,
        ErrorKind::JsonDecodeFailure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::ConnectTimeout => "ConnectTimeout",
            ErrorKind::ReadTimeout => "ReadTimeout",
            ErrorKind::ConnectionReset => "ConnectionReset",
            ErrorKind::ConnectorFailure => "ConnectorFailure",
            ErrorKind::MalformedWireHeader => "MalformedWireHeader",
            ErrorKind::MalformedLabel => "MalformedLabel",
            ErrorKind::JsonDecodeFailure => "JsonDecodeFailure",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::ConnectTimeout
            | ErrorKind::ReadTimeout
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectorFailure => ErrorCategory::Transport,

            ErrorKind::MalformedWireHeader
            | ErrorKind::MalformedLabel
            | ErrorKind::JsonDecodeFailure => ErrorCategory::Protocol,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ErrorKind::ConnectTimeout | ErrorKind::ReadTimeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
