//! Rate limiting middleware using Governor.
//!
//! Implements per-client rate limiting with a token bucket algorithm. The
//! checkout endpoint is public, so clients are told apart by their peer
//! address. Behind a proxy that sets `X-Forwarded-For`, the first hop can be
//! trusted instead.

use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Method, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::{
    net::SocketAddr,
    num::NonZeroU32,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use stars_types::ErrorResponse;

pub const RATE_LIMITED: &str = "Rate limit exceeded. Please try again later.";

/// Key for requests that arrive without connection info.
const UNKNOWN_PEER: &str = "unknown";

struct ClientBucket {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    last_seen: Instant,
}

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// Per-client rate limiters
    limiters: DashMap<String, ClientBucket>,
    /// Quota for new clients
    quota: Quota,
    period: Duration,
    trust_forwarded_for: bool,
    started: Instant,
    /// Milliseconds after `started` of the last idle sweep
    last_sweep_ms: AtomicU64,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::per_minute(100)
    }
}

impl RateLimiterState {
    /// Creates a new rate limiter state allowing `requests` per `period`.
    ///
    /// The whole allowance is available as a burst and refills evenly over
    /// the period.
    pub fn new(requests: u32, period: Duration) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period / burst.get())
            .unwrap_or_else(|| Quota::per_minute(burst))
            .allow_burst(burst);

        Self {
            limiters: DashMap::new(),
            quota,
            period,
            trust_forwarded_for: false,
            started: Instant::now(),
            last_sweep_ms: AtomicU64::new(0),
        }
    }

    pub fn per_minute(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(60))
    }

    /// Keys clients by the first `X-Forwarded-For` hop when present. Only
    /// enable behind a proxy that overwrites the header.
    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        self.sweep_idle(now);

        let mut bucket = self
            .limiters
            .entry(key.to_string())
            .or_insert_with(|| ClientBucket {
                limiter: RateLimiter::direct(self.quota),
                last_seen: now,
            });
        bucket.last_seen = now;
        bucket.limiter.check().is_ok()
    }

    /// Number of clients currently holding a bucket.
    pub fn tracked_clients(&self) -> usize {
        self.limiters.len()
    }

    /// Drops buckets idle for a full period, at most once per period. Such a
    /// bucket has refilled completely, so forgetting it changes nothing.
    fn sweep_idle(&self, now: Instant) {
        let period_ms = self.period.as_millis() as u64;
        let elapsed_ms = now.duration_since(self.started).as_millis() as u64;
        let last = self.last_sweep_ms.load(Ordering::Relaxed);
        if elapsed_ms.saturating_sub(last) < period_ms {
            return;
        }
        if self
            .last_sweep_ms
            .compare_exchange(last, elapsed_ms, Ordering::Relaxed, Ordering::Relaxed)
            .is_err()
        {
            return;
        }

        let before = self.limiters.len();
        self.limiters
            .retain(|_, bucket| now.duration_since(bucket.last_seen) < self.period);
        tracing::debug!(
            removed = before.saturating_sub(self.limiters.len()),
            "Swept idle rate limit buckets"
        );
    }

    fn client_key(&self, request: &Request<Body>) -> String {
        if self.trust_forwarded_for {
            let forwarded = request
                .headers()
                .get("X-Forwarded-For")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').next())
                .map(str::trim)
                .filter(|s| !s.is_empty());
            if let Some(hop) = forwarded {
                return hop.to_string();
            }
        }

        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_PEER.to_string())
    }
}

/// Rate limiting middleware.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Health checks and CORS preflights are never limited
    if request.uri().path() == "/health" || request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    let key = limiter.client_key(&request);

    if !limiter.check(&key) {
        tracing::warn!(client = %key, "Rate limit exceeded");
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: RATE_LIMITED.into(),
            }),
        )
            .into_response();
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(limiter.period.as_secs()));
        return response;
    }

    next.run(request).await
}
