//! DNS-over-HTTPS client (RFC 8484 and the JSON API)
//!
//! Wire format:
//! ```text
//! POST /dns-query HTTP/1.1 or HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```
//!
//! JSON API:
//! ```text
//! GET /dns-query?name=example.com&type=A
//! Accept: application/dns-json
//! ```

use super::timing::RequestTiming;
use crate::dns::error_classifier::ErrorClassifier;
use crate::dns::forwarding::ResponseDecoder;
use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::ResolverClient;
use ferrous_doh_domain::{
    DomainError, EndpointScheme, Query, QueryPayload, Resolver, ResolverResult, TransportConfig,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

const USER_AGENT: &str = concat!("ferrous-doh/", env!("CARGO_PKG_VERSION"));

/// HTTP clients for one fan-out run.
///
/// Holds one direct client plus one client per distinct proxy URL. Each
/// client pools its own connections; everything is released when the
/// session is dropped.
pub struct DohSession {
    direct: reqwest::Client,
    proxied: FxHashMap<Arc<str>, reqwest::Client>,
    scheme: EndpointScheme,
}

impl DohSession {
    pub fn open(config: &TransportConfig, resolvers: &[Resolver]) -> Result<Self, DomainError> {
        let direct = Self::client_builder(config)
            .no_proxy()
            .build()
            .map_err(|e| DomainError::SessionSetup(e.to_string()))?;

        let mut proxied = FxHashMap::default();
        for proxy_url in resolvers.iter().filter_map(Resolver::proxy) {
            if proxied.contains_key(proxy_url) {
                continue;
            }

            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                DomainError::SessionSetup(format!("Invalid proxy '{}': {}", proxy_url, e))
            })?;
            let client = Self::client_builder(config)
                .proxy(proxy)
                .build()
                .map_err(|e| DomainError::SessionSetup(e.to_string()))?;

            proxied.insert(Arc::from(proxy_url), client);
        }

        debug!(
            scheme = %config.scheme,
            connect_timeout_ms = config.connect_timeout_ms,
            read_timeout_ms = config.read_timeout_ms,
            proxies = proxied.len(),
            "DoH session opened"
        );

        Ok(Self {
            direct,
            proxied,
            scheme: config.scheme,
        })
    }

    pub fn scheme(&self) -> EndpointScheme {
        self.scheme
    }

    fn client_builder(config: &TransportConfig) -> reqwest::ClientBuilder {
        let builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(USER_AGENT)
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(1);

        match config.read_timeout() {
            Some(read_timeout) => builder.read_timeout(read_timeout),
            None => builder,
        }
    }

    fn client_for(&self, resolver: &Resolver) -> Result<&reqwest::Client, DomainError> {
        match resolver.proxy() {
            None => Ok(&self.direct),
            Some(proxy) => self.proxied.get(proxy).ok_or_else(|| {
                DomainError::SessionSetup(format!(
                    "No client for proxy '{}' of resolver {}",
                    proxy, resolver
                ))
            }),
        }
    }
}

impl Drop for DohSession {
    fn drop(&mut self) {
        debug!("DoH session released");
    }
}

/// [`ResolverClient`] speaking DoH over a shared [`DohSession`].
pub struct DohResolverClient {
    session: DohSession,
}

impl DohResolverClient {
    pub fn new(session: DohSession) -> Self {
        Self { session }
    }

    fn request(
        &self,
        client: &reqwest::Client,
        resolver: &Resolver,
        query: &Query,
    ) -> RequestBuilder {
        let url = resolver.endpoint(self.session.scheme().as_str());
        let media_type = query.protocol().media_type();

        match query.payload() {
            QueryPayload::Wire(bytes) => client
                .post(url)
                .header(ACCEPT, media_type)
                .header(CONTENT_TYPE, media_type)
                .body(bytes.clone()),
            QueryPayload::Json(params) => client
                .get(url)
                .header(ACCEPT, media_type)
                .query(&params.pairs()),
        }
    }

    async fn send(request: RequestBuilder) -> Result<(StatusCode, Bytes), reqwest::Error> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl ResolverClient for DohResolverClient {
    async fn resolve(
        &self,
        resolver: &Resolver,
        query: &Query,
    ) -> Result<ResolverResult, DomainError> {
        let client = self.session.client_for(resolver)?;
        let request = self.request(client, resolver, query);

        debug!(
            resolver = %resolver,
            protocol = %query.protocol(),
            proxy = resolver.proxy().unwrap_or("-"),
            "Sending DoH query"
        );

        let mut timing = RequestTiming::start();
        let body = match Self::send(request).await {
            Ok((status, body)) => {
                timing.complete();
                debug!(
                    resolver = %resolver,
                    status = status.as_u16(),
                    response_len = body.len(),
                    "DoH response received"
                );
                body
            }
            Err(e) => {
                let kind = ErrorClassifier::classify_transport(resolver, &e)?;
                debug!(resolver = %resolver, error = %e, kind = %kind, "DoH request failed");
                return Ok(ResolverResult::failure(
                    resolver.clone(),
                    timing.latency(),
                    kind,
                ));
            }
        };

        let outcome = ResponseDecoder::decode(query.protocol(), &body);
        Ok(ResolverResult::new(
            resolver.clone(),
            timing.latency(),
            outcome,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_routes_proxied_resolvers() {
        let config = TransportConfig::default();
        let direct = Resolver::new("dns.google").unwrap();
        let proxied = Resolver::new("cloudflare-dns.com")
            .unwrap()
            .with_proxy("http://127.0.0.1:3128");
        let also_proxied = Resolver::new("dns.quad9.net")
            .unwrap()
            .with_proxy("http://127.0.0.1:3128");

        let session =
            DohSession::open(&config, &[direct.clone(), proxied.clone(), also_proxied]).unwrap();

        assert_eq!(session.proxied.len(), 1);
        assert!(session.client_for(&direct).is_ok());
        assert!(session.client_for(&proxied).is_ok());
    }

    #[test]
    fn test_unknown_proxy_is_fatal() {
        let session = DohSession::open(&TransportConfig::default(), &[]).unwrap();
        let stray = Resolver::new("dns.google")
            .unwrap()
            .with_proxy("http://10.0.0.1:8080");

        assert!(matches!(
            session.client_for(&stray),
            Err(DomainError::SessionSetup(_))
        ));
    }

    #[test]
    fn test_session_defaults_to_https() {
        let session = DohSession::open(&TransportConfig::default(), &[]).unwrap();
        assert_eq!(session.scheme(), EndpointScheme::Https);
    }
}
