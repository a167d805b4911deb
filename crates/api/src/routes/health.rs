//! Health check endpoint.

/// GET /health — liveness probe, returns the literal text `OK`.
pub async fn check() -> &'static str {
    "OK"
}
