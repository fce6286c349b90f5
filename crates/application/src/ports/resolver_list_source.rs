use async_trait::async_trait;
use ferrous_doh_domain::{DomainError, Resolver};

#[async_trait]
pub trait ResolverListSource: Send + Sync {
    async fn load_resolvers(&self) -> Result<Vec<Resolver>, DomainError>;
}
