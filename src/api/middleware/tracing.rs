//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Span;

const UNMATCHED_ROUTE: &str = "<unmatched>";

/// Span constructor used by [`layer`].
pub type MakeRequestSpan = fn(&Request<Body>) -> Span;

/// Route template the router matched, e.g. `/api/meetup/{id}`.
///
/// Requests that hit the fallback carry no [`MatchedPath`].
pub fn route_label(request: &Request<Body>) -> &str {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_ROUTE, MatchedPath::as_str)
}

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        route = route_label(request),
        uri = %request.uri(),
        version = ?request.version(),
    )
}

/// Creates a tracing middleware for HTTP requests.
///
/// **On Request:** opens an `INFO` span carrying the method, the matched
/// route template, the concrete URI and the HTTP version. The route field
/// groups `/api/meetup/7` and `/api/meetup/11` under `/api/meetup/{id}`.
///
/// **On Response:** logs status and latency in milliseconds at `INFO`.
///
/// ```text
/// INFO request{method=PUT route=/api/registration/{id} uri=/api/registration/3 version=HTTP/1.1}:
///     finished processing request latency=8 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeRequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeRequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(tracing::Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
