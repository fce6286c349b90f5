use ferrous_doh_application::use_cases::{FanOutCoordinator, LoadResolversUseCase};
use ferrous_doh_domain::{Config, Resolver};
use ferrous_doh_infrastructure::dns::transport::{DohResolverClient, DohSession};
use ferrous_doh_infrastructure::system::FileResolverList;
use std::sync::Arc;
use tracing::info;

pub struct DohServices {
    pub load_resolvers: LoadResolversUseCase,
}

impl DohServices {
    pub fn new(config: &Config) -> Self {
        let source = Arc::new(FileResolverList::new(&config.resolvers.file));
        let load_resolvers =
            LoadResolversUseCase::new(source).with_default_proxy(config.transport.proxy.clone());

        Self { load_resolvers }
    }

    pub async fn resolvers(&self, config: &Config) -> anyhow::Result<Vec<Resolver>> {
        let resolvers = self
            .load_resolvers
            .execute(&config.resolvers.servers)
            .await?;

        info!(
            resolvers = resolvers.len(),
            source = if config.resolvers.servers.is_empty() {
                config.resolvers.file.as_str()
            } else {
                "inline"
            },
            "Resolvers loaded"
        );

        Ok(resolvers)
    }

    /// One session per run, owned by the client the coordinator shares
    /// between invocations.
    pub fn fan_out(
        &self,
        config: &Config,
        resolvers: Vec<Resolver>,
    ) -> anyhow::Result<FanOutCoordinator> {
        let session = DohSession::open(&config.transport, &resolvers)?;
        let client = Arc::new(DohResolverClient::new(session));
        Ok(FanOutCoordinator::new(client, resolvers)?)
    }
}
