//! Per-client quota enforcement for `/api` routes.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use katha_core::error::CoreError;

use crate::error::AppError;
use crate::rate_limit::{RateDecision, RATE_LIMIT_MESSAGE};
use crate::state::AppState;

const LIMIT_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const REMAINING_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Count the request against its client's window, rejecting with
/// `429 { success: false, error: RATE_LIMIT_MESSAGE }` once the quota is spent.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = client_key(&request, state.config.rate_limit.trust_proxy);
    let limiter = &state.rate_limiter;

    match limiter.check(&client).await {
        RateDecision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(LIMIT_HEADER, HeaderValue::from(limiter.max_requests()));
            headers.insert(REMAINING_HEADER, HeaderValue::from(remaining));
            response
        }
        RateDecision::Limited { retry_after } => {
            tracing::warn!(%client, retry_after_secs = retry_after.as_secs(), "Rate limit exceeded");
            let mut response =
                AppError::Core(CoreError::RateLimited(RATE_LIMIT_MESSAGE.to_string()))
                    .into_response();
            // Round up so clients never retry a fraction of a second early.
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            response
                .headers_mut()
                .insert(axum::http::header::RETRY_AFTER, HeaderValue::from(secs));
            response
        }
    }
}

/// Identify the client a request counts against.
///
/// Uses the socket peer address, or the first `X-Forwarded-For` hop when the
/// server runs behind a trusted proxy. Falls back to a shared `unknown`
/// bucket when neither is available.
pub fn client_key(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        if let Some(ip) = forwarded_for(request.headers()) {
            return ip;
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}
