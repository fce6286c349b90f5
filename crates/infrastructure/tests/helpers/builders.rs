#![allow(dead_code)]
use ferrous_doh_domain::{EndpointScheme, Resolver, TransportConfig};

pub struct TransportBuilder;

impl TransportBuilder {
    /// Plain HTTP against loopback mocks, short timeouts.
    pub fn local_http() -> TransportConfig {
        TransportConfig {
            connect_timeout_ms: 1_000,
            read_timeout_ms: 2_000,
            scheme: EndpointScheme::Http,
            proxy: None,
        }
    }

    pub fn local_https(connect_timeout_ms: u64) -> TransportConfig {
        TransportConfig {
            connect_timeout_ms,
            read_timeout_ms: 2_000,
            scheme: EndpointScheme::Https,
            proxy: None,
        }
    }

    pub fn with_read_timeout(mut config: TransportConfig, read_timeout_ms: u64) -> TransportConfig {
        config.read_timeout_ms = read_timeout_ms;
        config
    }
}

pub struct ResolverBuilder;

impl ResolverBuilder {
    pub fn local(host: &str) -> Resolver {
        Resolver::new(host).unwrap()
    }
}
