use actix_web::{
    Error, HttpResponse, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use chrono::{DateTime, Duration, Utc};
use futures_util::future::LocalBoxFuture;
use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    rc::Rc,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::config::Config;
use crate::handlers::shared::ApiResponse;

/// Rate limit configuration
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Window duration in seconds
    pub window_seconds: i64,
    /// Message to return when rate limit is exceeded
    pub message: String,
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_seconds: i64) -> Self {
        Self {
            max_requests,
            window_seconds,
            message: "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.".to_string(),
        }
    }

    /// Limits for the sign-up, login and google login endpoints.
    pub fn for_auth(config: &Config) -> Self {
        Self::new(config.auth_rate_limit_max, config.auth_rate_limit_window_secs)
    }
}

#[derive(Debug, Clone)]
struct RequestTracker {
    count: u32,
    window_start: DateTime<Utc>,
}

impl RequestTracker {
    fn new() -> Self {
        Self {
            count: 0,
            window_start: Utc::now(),
        }
    }

    fn is_expired(&self, window_seconds: i64) -> bool {
        let window_duration =
            Duration::try_seconds(window_seconds).unwrap_or(Duration::seconds(60));
        Utc::now() > self.window_start + window_duration
    }

    fn reset(&mut self) {
        self.count = 1;
        self.window_start = Utc::now();
    }
}

/// Fixed-window request counters per client IP, shared by every worker.
#[derive(Clone, Default)]
pub struct RateLimitStore {
    ip_trackers: Arc<Mutex<HashMap<IpAddr, RequestTracker>>>,
}

impl RateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn trackers(&self) -> MutexGuard<'_, HashMap<IpAddr, RequestTracker>> {
        self.ip_trackers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Counts the request; `false` once the IP used up its window.
    fn check_and_update_ip(&self, ip: IpAddr, config: &RateLimitConfig) -> bool {
        let mut trackers = self.trackers();
        let tracker = trackers.entry(ip).or_insert_with(RequestTracker::new);

        if tracker.is_expired(config.window_seconds) {
            tracker.reset();
            true
        } else if tracker.count >= config.max_requests {
            false
        } else {
            tracker.count += 1;
            true
        }
    }

    pub fn cleanup_expired(&self, window_seconds: i64) {
        self.trackers()
            .retain(|_, tracker| !tracker.is_expired(window_seconds));
    }
}

pub struct RateLimitMiddleware {
    store: RateLimitStore,
    config: RateLimitConfig,
}

impl RateLimitMiddleware {
    pub fn with_store(config: RateLimitConfig, store: RateLimitStore) -> Self {
        Self { store, config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitService<S>;
    type InitError = ();
    type Future = futures_util::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        futures_util::future::ready(Ok(RateLimitService {
            service: Rc::new(service),
            store: self.store.clone(),
            config: self.config.clone(),
        }))
    }
}

pub struct RateLimitService<S> {
    service: Rc<S>,
    store: RateLimitStore,
    config: RateLimitConfig,
}

fn client_ip(req: &ServiceRequest) -> Option<IpAddr> {
    let peer = req.connection_info().peer_addr()?.to_string();
    peer.parse::<SocketAddr>()
        .map(|addr| addr.ip())
        .or_else(|_| peer.parse::<IpAddr>())
        .ok()
}

impl<S, B> Service<ServiceRequest> for RateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let store = self.store.clone();
        let config = self.config.clone();

        Box::pin(async move {
            if let Some(ip) = client_ip(&req) {
                if !store.check_and_update_ip(ip, &config) {
                    log::warn!("Rate limit exceeded for IP: {}", ip);
                    let response = HttpResponse::TooManyRequests()
                        .json(ApiResponse::<()>::error(&config.message, "rate_limited"));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Background task to clean up expired rate limit entries
pub async fn cleanup_rate_limits(store: RateLimitStore, window_seconds: i64, interval_seconds: u64) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_seconds));

    loop {
        interval.tick().await;
        store.cleanup_expired(window_seconds);
        log::debug!("Cleaned up expired rate limit entries");
    }
}
