use async_trait::async_trait;
use ferrous_doh_application::ports::ResolverListSource;
use ferrous_doh_domain::{DomainError, Resolver};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

/// Line-delimited resolver list.
///
/// ```text
/// # host                 [proxy]
/// dns.google
/// cloudflare-dns.com     http://127.0.0.1:3128
/// ```
pub struct FileResolverList {
    path: PathBuf,
}

impl FileResolverList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(content: &str) -> Vec<Resolver> {
        let mut resolvers = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = match line.split_once('#') {
                Some((before, _)) => before,
                None => line,
            };

            let mut fields = line.split_whitespace();
            let Some(host) = fields.next() else {
                continue;
            };
            let proxy = fields.next();

            if fields.next().is_some() {
                warn!(
                    line = line_num + 1,
                    "Extra columns in resolver list, ignoring them"
                );
            }

            if let Some(Err(e)) = proxy.map(check_proxy) {
                warn!(line = line_num + 1, error = %e, "Skipping resolver with invalid proxy");
                continue;
            }

            match Resolver::new(host) {
                Ok(resolver) => resolvers.push(match proxy {
                    Some(proxy) => resolver.with_proxy(proxy),
                    None => resolver,
                }),
                Err(e) => {
                    warn!(line = line_num + 1, error = %e, "Skipping invalid resolver entry");
                }
            }
        }

        resolvers
    }
}

fn check_proxy(proxy: &str) -> Result<(), String> {
    let url = reqwest::Url::parse(proxy).map_err(|e| format!("'{}': {}", proxy, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("'{}': unsupported proxy scheme", proxy));
    }
    if url.host_str().is_none() {
        return Err(format!("'{}': missing proxy host", proxy));
    }

    reqwest::Proxy::all(proxy)
        .map(|_| ())
        .map_err(|e| format!("'{}': {}", proxy, e))
}

#[async_trait]
impl ResolverListSource for FileResolverList {
    async fn load_resolvers(&self) -> Result<Vec<Resolver>, DomainError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed to read resolver list {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let resolvers = Self::parse(&content);
        debug!(
            path = %self.path.display(),
            resolvers = resolvers.len(),
            "Resolver list parsed"
        );
        Ok(resolvers)
    }
}
