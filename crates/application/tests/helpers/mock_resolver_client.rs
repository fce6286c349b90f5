#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_doh_application::ports::{ResolverClient, ResolverListSource};
use ferrous_doh_domain::{
    Answer, DomainError, ErrorKind, JsonParams, Outcome, Query, QueryPayload, Record, RecordType,
    Resolver, ResolverResult,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone)]
enum Scripted {
    Outcome(Outcome),
    Fatal(DomainError),
}

/// Resolver client answering from a script keyed by resolver host.
///
/// Unscripted hosts answer `example.com. 60 A 93.184.216.34` immediately.
pub struct MockResolverClient {
    script: RwLock<HashMap<String, (Duration, Scripted)>>,
    calls: AtomicUsize,
    released: Arc<AtomicBool>,
}

impl MockResolverClient {
    pub fn new() -> Self {
        Self {
            script: RwLock::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn answer_after(&self, host: &str, delay: Duration) {
        self.script.write().await.insert(
            host.to_string(),
            (delay, Scripted::Outcome(Outcome::Answers(vec![example_answer()]))),
        );
    }

    pub async fn fail_with(&self, host: &str, delay: Duration, kind: ErrorKind) {
        self.script.write().await.insert(
            host.to_string(),
            (delay, Scripted::Outcome(Outcome::Failure(kind))),
        );
    }

    pub async fn abort_with(&self, host: &str, delay: Duration, error: DomainError) {
        self.script
            .write()
            .await
            .insert(host.to_string(), (delay, Scripted::Fatal(error)));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Flips to `true` once the client is dropped.
    pub fn released_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.released)
    }
}

impl Drop for MockResolverClient {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResolverClient for MockResolverClient {
    async fn resolve(
        &self,
        resolver: &Resolver,
        _query: &Query,
    ) -> Result<ResolverResult, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let scripted = self.script.read().await.get(resolver.host()).cloned();
        let (delay, scripted) = scripted.unwrap_or((
            Duration::ZERO,
            Scripted::Outcome(Outcome::Answers(vec![example_answer()])),
        ));

        tokio::time::sleep(delay).await;

        match scripted {
            Scripted::Outcome(outcome) => {
                let latency = match &outcome {
                    Outcome::Failure(kind) if kind.is_timeout() => None,
                    _ => Some(delay),
                };
                Ok(ResolverResult::new(resolver.clone(), latency, outcome))
            }
            Scripted::Fatal(error) => Err(error),
        }
    }
}

pub struct MockResolverListSource {
    hosts: Vec<&'static str>,
    fail: bool,
}

impl MockResolverListSource {
    pub fn with_hosts(hosts: Vec<&'static str>) -> Self {
        Self { hosts, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            hosts: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ResolverListSource for MockResolverListSource {
    async fn load_resolvers(&self) -> Result<Vec<Resolver>, DomainError> {
        if self.fail {
            return Err(DomainError::IoError(
                "server_list.txt: not found".to_string(),
            ));
        }
        Ok(self
            .hosts
            .iter()
            .map(|host| Resolver::new(host).unwrap())
            .collect())
    }
}

pub fn example_answer() -> Answer {
    Answer::Record(Record::new("example.com.", 60, "A", "93.184.216.34"))
}

pub fn json_query(name: &str) -> Arc<Query> {
    let params = JsonParams {
        name: Arc::from(name),
        record_type: RecordType::A.as_str(),
    };
    Arc::new(Query::new(
        name,
        RecordType::A,
        None,
        QueryPayload::Json(params),
    ))
}

pub fn resolvers(hosts: &[&str]) -> Vec<Resolver> {
    hosts
        .iter()
        .map(|host| Resolver::new(host).unwrap())
        .collect()
}
