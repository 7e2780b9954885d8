//! HTTP observability middleware
//!
//! A Tower Layer/Service that propagates the request ID and records the
//! per-route request metrics. Requests are labelled by the route they
//! matched; anything that matched no route shares one label.

use axum::{body::Body, extract::MatchedPath, http::Request, response::Response};
use metrics::{counter, histogram};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const UNMATCHED_ROUTE: &str = "unmatched";

/// Tower Layer for HTTP observability (request ID + metrics).
#[derive(Clone)]
pub struct ObservabilityLayer;

impl<S> Layer<S> for ObservabilityLayer {
    type Service = ObservabilityMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ObservabilityMiddleware { inner }
    }
}

#[derive(Clone)]
pub struct ObservabilityMiddleware<S> {
    inner: S,
}

/// Route template the request matched
fn route_label<B>(request: &Request<B>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

impl<S> Service<Request<Body>> for ObservabilityMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let method = request.method().to_string();
        let route = route_label(&request);

        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let start = Instant::now();
        let mut inner = self.inner.clone();
        let span = tracing::info_span!("request", request_id = %request_id, route = %route);

        Box::pin(
            async move {
                let mut response = inner.call(request).await?;

                let duration = start.elapsed().as_secs_f64();
                let status = response.status().as_u16().to_string();

                counter!("catalog_http_requests_total", "method" => method.clone(), "route" => route.clone(), "status" => status)
                    .increment(1);
                histogram!("catalog_http_request_duration_seconds", "method" => method, "route" => route)
                    .record(duration);

                if let Ok(val) = request_id.parse() {
                    response.headers_mut().insert(REQUEST_ID_HEADER, val);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}
