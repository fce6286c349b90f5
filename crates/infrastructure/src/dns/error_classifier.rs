use ferrous_doh_domain::{DomainError, ErrorKind, Resolver};
use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Maps concrete failures onto the closed [`ErrorKind`] set.
///
/// Transport failures that fit none of the kinds are returned as a fatal
/// [`DomainError::UnclassifiedTransport`].
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn classify_transport(
        resolver: &Resolver,
        error: &reqwest::Error,
    ) -> Result<ErrorKind, DomainError> {
        if Self::is_connection_reset(error) {
            return Ok(ErrorKind::ConnectionReset);
        }

        if error.is_timeout() {
            return Ok(if error.is_connect() {
                ErrorKind::ConnectTimeout
            } else {
                ErrorKind::ReadTimeout
            });
        }

        if error.is_connect() {
            return Ok(ErrorKind::ConnectorFailure);
        }

        Err(DomainError::UnclassifiedTransport {
            server: resolver.to_string(),
            reason: Self::describe(error),
        })
    }

    /// Wire decode failures: anything about names or labels is
    /// `MalformedLabel`, every other structural problem is
    /// `MalformedWireHeader`.
    pub fn classify_decode(error: &impl fmt::Display) -> ErrorKind {
        let error_str = error.to_string().to_lowercase();

        if error_str.contains("label") || error_str.contains("pointer") {
            ErrorKind::MalformedLabel
        } else {
            ErrorKind::MalformedWireHeader
        }
    }

    /// Reset or aborted sockets anywhere in the source chain, plus peers that
    /// hang up mid-response (hyper reports those without an io error).
    fn is_connection_reset(error: &reqwest::Error) -> bool {
        if Self::describe(error)
            .to_lowercase()
            .contains("connection closed before message completed")
        {
            return true;
        }

        let mut source: Option<&(dyn StdError + 'static)> = Some(error);
        while let Some(err) = source {
            if let Some(io_err) = err.downcast_ref::<io::Error>() {
                if matches!(
                    io_err.kind(),
                    io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted
                ) {
                    return true;
                }
            }
            source = err.source();
        }
        false
    }

    /// `error: cause: cause` for the whole source chain.
    fn describe(error: &reqwest::Error) -> String {
        let mut description = error.to_string();
        let mut source = error.source();
        while let Some(err) = source {
            description.push_str(": ");
            description.push_str(&err.to_string());
            source = err.source();
        }
        description
    }
}
