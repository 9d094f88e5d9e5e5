use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use tracing::info;

/// Logs method, path, and client IP address for each incoming HTTP request.
/// Automatically skips CORS preflight `OPTIONS` requests.
///
/// ### Usage:
/// Apply this middleware globally using:
///
/// ```ignore
/// use axum::Router;
/// use axum::middleware::from_fn;
/// use api::middleware::log_request;
///
/// let app = Router::new().layer(from_fn(log_request));
/// ```
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    // Skip logging for preflight requests
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    info!(
        method = %req.method(),
        path = %req.uri().path(),
        ip = %addr.ip(),
        "request"
    );

    Ok(next.run(req).await)
}
