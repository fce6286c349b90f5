use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A DoH resolver, addressed by hostname (optionally `host:port`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resolver {
    host: Arc<str>,
    proxy: Option<Arc<str>>,
}

impl Resolver {
    pub fn new(host: impl AsRef<str>) -> Result<Self, String> {
        let host = host.as_ref().trim();
        Self::validate_host(host)?;
        Ok(Self {
            host: Arc::from(host),
            proxy: None,
        })
    }

    /// Route requests to this resolver through an HTTP proxy.
    pub fn with_proxy(mut self, proxy: impl AsRef<str>) -> Self {
        let proxy = proxy.as_ref().trim();
        self.proxy = if proxy.is_empty() {
            None
        } else {
            Some(Arc::from(proxy))
        };
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// `{scheme}://{host}/dns-query`
    pub fn endpoint(&self, scheme: &str) -> String {
        format!("{}://{}/dns-query", scheme, self.host)
    }

    fn validate_host(host: &str) -> Result<(), String> {
        if host.is_empty() {
            return Err("Resolver host cannot be empty".to_string());
        }
        if host.contains("://") {
            return Err(format!(
                "Resolver '{}' must be a bare host, not a URL",
                host
            ));
        }
        if host.contains(['/', '?', '#']) || host.chars().any(char::is_whitespace) {
            return Err(format!("Resolver '{}' contains invalid characters", host));
        }
        Ok(())
    }
}

impl FromStr for Resolver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}
