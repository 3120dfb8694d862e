//! HTTP routes

pub mod health;
pub mod print;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};

/// Routes without middleware
pub fn build_router() -> Router {
    Router::new()
        .route("/", get(print::print))
        .route("/health", get(health::health_check))
}

/// Fully layered application, used by `main` and by tests
pub fn build_app(config: &Config) -> BridgeResult<Router> {
    Ok(build_router()
        .layer(cors_layer(&config.allowed_origin)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(origin: &str) -> BridgeResult<CorsLayer> {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        let value = HeaderValue::from_str(origin)
            .map_err(|e| BridgeError::Config(format!("ALLOWED_ORIGIN {origin:?}: {e}")))?;
        AllowOrigin::list([value])
    };
    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unusable_origin() {
        let config = Config::default().with_allowed_origin("https://bad\norigin");
        assert!(matches!(build_app(&config), Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_accepts_wildcard() {
        let config = Config::default().with_allowed_origin("*");
        assert!(build_app(&config).is_ok());
    }
}
