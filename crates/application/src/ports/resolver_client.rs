use async_trait::async_trait;
use ferrous_doh_domain::{DomainError, Query, Resolver, ResolverResult};

/// Sends one query to one resolver.
///
/// Expected failures (timeouts, resets, malformed bodies) come back as
/// `Ok` with [`ferrous_doh_domain::Outcome::Failure`]. `Err` is reserved for
/// failures outside that closed set and ends the whole run.
#[async_trait]
pub trait ResolverClient: Send + Sync {
    async fn resolve(
        &self,
        resolver: &Resolver,
        query: &Query,
    ) -> Result<ResolverResult, DomainError>;
}
