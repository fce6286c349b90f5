use crate::ports::ResolverClient;
use ferrous_doh_domain::{DomainError, Query, Resolver, ResolverResult};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, Stream, StreamExt};
use futures::FutureExt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{debug, info, warn};

type Invocation = BoxFuture<'static, Result<ResolverResult, DomainError>>;

/// Sends one query to every resolver at once and reports each answer as it
/// lands.
///
/// Invocations are plain futures polled from a single `FuturesUnordered`, so
/// they share the caller's task and scheduler: no threads, no spawned tasks.
/// Every invocation holds a clone of the client; the client (and whatever
/// session it owns) is released when the last one finishes or the returned
/// [`FanOut`] is dropped.
pub struct FanOutCoordinator {
    client: Arc<dyn ResolverClient>,
    resolvers: Vec<Resolver>,
}

impl FanOutCoordinator {
    pub fn new(
        client: Arc<dyn ResolverClient>,
        resolvers: Vec<Resolver>,
    ) -> Result<Self, DomainError> {
        if resolvers.is_empty() {
            return Err(DomainError::NoResolvers);
        }

        Ok(Self { client, resolvers })
    }

    /// Launch one invocation per resolver. Results are yielded in completion
    /// order, not in list order.
    pub fn dispatch(self, query: Arc<Query>) -> FanOut {
        let expected = self.resolvers.len();

        info!(
            resolvers = expected,
            name = %query.name(),
            record_type = %query.record_type(),
            protocol = %query.protocol(),
            "Dispatching query to all resolvers"
        );

        let pending: FuturesUnordered<Invocation> = self
            .resolvers
            .into_iter()
            .map(|resolver| {
                let client = Arc::clone(&self.client);
                let query = Arc::clone(&query);
                async move { client.resolve(&resolver, &query).await }.boxed()
            })
            .collect();

        FanOut {
            pending,
            expected,
            delivered: 0,
            aborted: false,
        }
    }
}

/// Completion-ordered stream of per-resolver results.
///
/// Yields exactly one `Ok` item per resolver. A fatal `Err` is yielded at most
/// once and ends the stream; the invocations still in flight are dropped.
pub struct FanOut {
    pending: FuturesUnordered<Invocation>,
    expected: usize,
    delivered: usize,
    aborted: bool,
}

impl FanOut {
    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Drain every result, in completion order.
    pub async fn collect_all(mut self) -> Result<Vec<ResolverResult>, DomainError> {
        let mut results = Vec::with_capacity(self.expected);
        while let Some(item) = self.next().await {
            results.push(item?);
        }
        Ok(results)
    }
}

impl Stream for FanOut {
    type Item = Result<ResolverResult, DomainError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.aborted {
            return Poll::Ready(None);
        }

        match self.pending.poll_next_unpin(cx) {
            Poll::Ready(Some(Ok(result))) => {
                self.delivered += 1;
                debug!(
                    resolver = %result.resolver,
                    latency = %result.latency_display(),
                    success = result.outcome.is_success(),
                    remaining = self.pending.len(),
                    "Resolver finished"
                );
                Poll::Ready(Some(Ok(result)))
            }
            Poll::Ready(Some(Err(e))) => {
                warn!(
                    error = %e,
                    abandoned = self.pending.len(),
                    "Fatal resolver failure, aborting fan-out"
                );
                self.aborted = true;
                self.pending.clear();
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                debug_assert_eq!(self.delivered, self.expected);
                info!(resolvers = self.delivered, "All resolvers reported");
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.aborted {
            (0, Some(0))
        } else {
            (0, Some(self.pending.len()))
        }
    }
}
