//! Request instrumentation and the Prometheus scrape endpoint.

use axum::{
    extract::{MatchedPath, Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::AppState;

/// `GET /api/metrics`
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.prometheus_handle {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics are disabled").into_response(),
    }
}

fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

/// First path segment below `/api`, e.g. `members` for `/api/members/search`.
fn resource(route: &str) -> &str {
    let route = route.strip_prefix("/api").unwrap_or(route);
    route
        .trim_start_matches('/')
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("root")
}

fn is_registration(method: &Method, route: &str) -> bool {
    method == Method::POST && route.strip_prefix("/api").unwrap_or(route) == "/members"
}

fn registration_outcome(status: StatusCode) -> &'static str {
    match status {
        StatusCode::CREATED => "registered",
        StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => "invalid",
        StatusCode::CONFLICT => "duplicate_email",
        _ => "failed",
    }
}

fn record(method: &Method, route: &str, status: StatusCode, elapsed: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("resource", resource(route).to_string()),
        ("route", route.to_string()),
        ("status", status.as_u16().to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels).record(elapsed.as_secs_f64());

    if is_registration(method, route) {
        metrics::counter!(
            "member_registration_requests_total",
            "outcome" => registration_outcome(status)
        )
        .increment(1);
    }
}

/// Wraps each routed request in a span and records one summary event.
///
/// Installed as a route layer so the matched route template is known and
/// metric labels stay bounded.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| path.clone(), |p| p.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        path = %path,
        route = %route,
        resource = resource(&route),
    );

    let response = next.run(req).instrument(span.clone()).await;

    let elapsed = started.elapsed();
    let status = response.status();
    record(&method, &route, status, elapsed);

    span.in_scope(|| {
        info!(
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status.as_u16(),
            outcome = outcome(status),
            "Request finished"
        );
    });

    response
}
