use thiserror::Error;

/// Run-fatal errors.
///
/// Per-resolver failures never show up here: they are carried by
/// [`crate::Outcome::Failure`]. A `DomainError` aborts the whole run.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("Invalid client subnet: {0}")]
    InvalidClientSubnet(String),

    #[error("Invalid resolver: {0}")]
    InvalidResolver(String),

    #[error("No resolvers to query")]
    NoResolvers,

    #[error("Failed to serialize DNS query: {0}")]
    QueryEncoding(String),

    #[error("Failed to build HTTP session: {0}")]
    SessionSetup(String),

    #[error("Unclassified transport failure from {server}: {reason}")]
    UnclassifiedTransport { server: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),
}
