use crate::ports::ResolverListSource;
use ferrous_doh_domain::{DomainError, Resolver};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds the resolver set for a run: inline servers win over the list
/// source, a default proxy fills in for resolvers without their own.
pub struct LoadResolversUseCase {
    source: Arc<dyn ResolverListSource>,
    default_proxy: Option<String>,
}

impl LoadResolversUseCase {
    pub fn new(source: Arc<dyn ResolverListSource>) -> Self {
        Self {
            source,
            default_proxy: None,
        }
    }

    pub fn with_default_proxy(mut self, proxy: Option<String>) -> Self {
        self.default_proxy = proxy;
        self
    }

    pub async fn execute(&self, inline: &[String]) -> Result<Vec<Resolver>, DomainError> {
        let loaded = if inline.is_empty() {
            self.source.load_resolvers().await?
        } else {
            inline
                .iter()
                .map(|host| Resolver::new(host).map_err(DomainError::InvalidResolver))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut seen = FxHashSet::default();
        let mut resolvers = Vec::with_capacity(loaded.len());

        for resolver in loaded {
            if !seen.insert(resolver.host().to_ascii_lowercase()) {
                warn!(resolver = %resolver, "Duplicate resolver, it will be queried twice");
            }

            let resolver = match (&self.default_proxy, resolver.proxy()) {
                (Some(proxy), None) => resolver.with_proxy(proxy),
                _ => resolver,
            };
            resolvers.push(resolver);
        }

        if resolvers.is_empty() {
            return Err(DomainError::NoResolvers);
        }

        debug!(count = resolvers.len(), "Resolver set loaded");
        Ok(resolvers)
    }
}
