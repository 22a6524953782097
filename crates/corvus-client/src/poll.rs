//! Generic long-poll loop.
//!
//! A [`PollRequest`] repeatedly invokes a caller-supplied fetch until the
//! observed (status, body) pair satisfies the configured acceptance
//! criteria, sleeping a fixed interval between attempts. The loop runs
//! entirely on the caller's task: the only suspension points are the
//! fetch itself and the inter-attempt sleep, and both observe the
//! deadline and cancellation of the supplied [`PollContext`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use corvus_client::{CorvusClient, PollContext};
//! use corvus_model::ClusterState;
//!
//! # async fn example() -> corvus_client::Result<()> {
//! # let client = CorvusClient::builder().base_url("http://x").build()?;
//! let ctx = PollContext::deadline_in(Duration::from_secs(3600));
//! let fetched = client
//!     .clusters()
//!     .poll("123")
//!     .interval(Duration::from_secs(30))
//!     .predicate(|f| {
//!         f.body
//!             .as_ref()
//!             .and_then(|c| c.status())
//!             .is_some_and(|s| s.state() == &ClusterState::Ready)
//!     })
//!     .start(&ctx)
//!     .await?;
//! println!("cluster ready: {:?}", fetched.body);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// One observed fetch result: the response status and, when the body
/// decoded to the resource type, the decoded value.
///
/// Non-2xx statuses are candidate results rather than errors here, so a
/// poll can wait for e.g. a 404 after a deletion.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    /// HTTP status of the fetch.
    pub status: StatusCode,
    /// Decoded resource, absent for non-2xx responses.
    pub body: Option<T>,
}

/// Deadline-bearing, cancellable execution context for a poll.
///
/// A deadline is mandatory: a poll whose predicates never hold would
/// otherwise loop forever, so [`PollRequest::start`] rejects a context
/// without one before any network activity.
#[derive(Debug, Clone)]
pub struct PollContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl PollContext {
    /// Create a context without a deadline. Starting a poll with it is a
    /// configuration error; attach one with [`deadline`](Self::deadline).
    pub fn new() -> Self {
        Self {
            deadline: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Create a context whose deadline is `timeout` from now.
    pub fn deadline_in(timeout: Duration) -> Self {
        Self::new().deadline(Instant::now() + timeout)
    }

    /// Set the absolute deadline.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach a caller-owned cancellation token.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The cancellation token observed by the poll loop.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl Default for PollContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A configured long-poll over a typed fetch operation.
///
/// Accumulate acceptance criteria with the fluent setters, then consume
/// the request with [`start`](Self::start); a poll runs exactly once.
pub struct PollRequest<T, F, Fut>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Fetched<T>>>,
{
    fetch: F,
    interval: Duration,
    statuses: Vec<StatusCode>,
    predicates: Vec<Box<dyn Fn(&Fetched<T>) -> bool + Send + Sync>>,
}

impl<T, F, Fut> PollRequest<T, F, Fut>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Fetched<T>>>,
{
    /// Wrap a fetch operation. The interval must be set before starting.
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            interval: Duration::ZERO,
            statuses: Vec::new(),
            predicates: Vec::new(),
        }
    }

    /// Set the delay between attempts. Must be positive.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Add a status code to the acceptable set. An empty set accepts any
    /// status.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.statuses.push(status);
        self
    }

    /// Add an acceptance predicate over the fetched result. All
    /// predicates must hold; an empty set is vacuously satisfied.
    /// Predicates are treated as pure and may be short-circuited.
    pub fn predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Fetched<T>) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Run the poll loop until an acceptable result, a transport error,
    /// the context's deadline, or cancellation.
    ///
    /// Preconditions are checked before the first fetch: the interval
    /// must be positive and the context must carry a deadline. Transport
    /// errors abort immediately and are never retried here; an in-flight
    /// fetch is never interrupted, only the next attempt is skipped.
    pub async fn start(mut self, ctx: &PollContext) -> Result<Fetched<T>> {
        if self.interval.is_zero() {
            return Err(Error::Configuration(
                "poll interval must be positive".to_string(),
            ));
        }
        let Some(deadline) = ctx.deadline else {
            return Err(Error::Configuration(
                "poll context must carry a deadline".to_string(),
            ));
        };

        let mut attempt: u64 = 0;
        loop {
            attempt += 1;
            let fetched = (self.fetch)().await?;
            if self.acceptable(&fetched) {
                debug!(attempt, status = %fetched.status, "poll accepted result");
                return Ok(fetched);
            }
            trace!(attempt, status = %fetched.status, "result not yet acceptable");

            tokio::select! {
                biased;
                _ = ctx.cancel.cancelled() => {
                    debug!(attempt, "poll cancelled");
                    return Err(Error::Cancelled);
                }
                _ = time::sleep_until(deadline) => {
                    debug!(attempt, "poll deadline exceeded");
                    return Err(Error::DeadlineExceeded);
                }
                _ = time::sleep(self.interval) => {}
            }
        }
    }

    fn acceptable(&self, fetched: &Fetched<T>) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&fetched.status) {
            return false;
        }
        self.predicates.iter().all(|predicate| predicate(fetched))
    }
}
