use super::{Answer, ErrorKind, Resolver};
use std::time::Duration;

/// What a single resolver produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Answer section, in the order the resolver returned it.
    Answers(Vec<Answer>),

    /// A JSON body without an `Answer` array, surfaced unchanged.
    Passthrough(serde_json::Value),

    Failure(ErrorKind),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failure(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Failure(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn answers(&self) -> &[Answer] {
        match self {
            Outcome::Answers(answers) => answers,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolverResult {
    pub resolver: Resolver,

    /// Request start to body-read completion. `None` when the body was never
    /// fully read.
    pub latency: Option<Duration>,

    pub outcome: Outcome,
}

impl ResolverResult {
    pub fn new(resolver: Resolver, latency: Option<Duration>, outcome: Outcome) -> Self {
        Self {
            resolver,
            latency,
            outcome,
        }
    }

    pub fn failure(resolver: Resolver, latency: Option<Duration>, kind: ErrorKind) -> Self {
        Self::new(resolver, latency, Outcome::Failure(kind))
    }

    pub fn latency_ms(&self) -> Option<f64> {
        self.latency.map(|d| d.as_secs_f64() * 1000.0)
    }

    pub fn latency_display(&self) -> String {
        match self.latency_ms() {
            Some(ms) => format!("{:.1} ms", ms),
            None => "unknown".to_string(),
        }
    }
}
