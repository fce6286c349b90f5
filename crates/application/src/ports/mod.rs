mod resolver_client;
mod resolver_list_source;

pub use resolver_client::ResolverClient;
pub use resolver_list_source::ResolverListSource;

// Re-export for convenience
pub use ferrous_doh_domain::{Query, Resolver, ResolverResult};
