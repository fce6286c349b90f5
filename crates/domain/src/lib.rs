//! Ferrous DoH Domain Layer
pub mod client_subnet;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod error_kind;
pub mod errors;
pub mod resolver;
pub mod resolver_result;

pub use client_subnet::ClientSubnet;
pub use config::{
    CliOverrides, Config, ConfigError, EndpointScheme, LoggingConfig, QueryConfig,
    ResolversConfig, TransportConfig,
};
pub use dns_query::{DohProtocol, JsonParams, Query, QueryPayload};
pub use dns_record::{Answer, Record, RecordType};
pub use error_kind::{ErrorCategory, ErrorKind};
pub use errors::DomainError;
pub use resolver::Resolver;
pub use resolver_result::{Outcome, ResolverResult};
