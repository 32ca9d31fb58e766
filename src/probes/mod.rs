//! Network probes: REST endpoints, streaming, latency and rate limits
//!
//! Probes never return errors. Transport failures, timeouts, malformed
//! bodies and throttling are all folded into the result they produce.

pub mod endpoint;
pub mod stream;
pub mod latency;
pub mod rate_limit;

pub use endpoint::*;
pub use stream::*;
pub use latency::*;
pub use rate_limit::*;

use std::time::Duration;
use tokio::time::Instant;
use crate::{
    errors::{CompatError, CompatResult},
    network::{HttpFetcher, HttpReply, QueryParams},
};

/// One GET bounded by `limit`, with the wall time it took. Pacing delays
/// are never part of the measured time.
pub(crate) async fn timed_get(
    fetcher: &dyn HttpFetcher,
    url: &str,
    params: &QueryParams,
    limit: Duration,
) -> (Duration, CompatResult<HttpReply>) {
    let started = Instant::now();
    let outcome = match tokio::time::timeout(limit, fetcher.get(url, params)).await {
        Ok(result) => result,
        Err(_) => Err(CompatError::Timeout { after: limit }),
    };
    (started.elapsed(), outcome)
}
