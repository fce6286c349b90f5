mod errors;
mod logging;
mod query;
mod resolvers;
mod root;
mod transport;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use query::QueryConfig;
pub use resolvers::ResolversConfig;
pub use root::{CliOverrides, Config};
pub use transport::{EndpointScheme, TransportConfig};
