use axum::Json;
use serde_json::{json, Value};

/// Liveness probe. Returns 200 OK with basic service identification.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "draft-session-core",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await;
        let value = response.0;

        assert_eq!(value["status"], "healthy");
        assert_eq!(value["service"], "draft-session-core");
        assert!(value["version"].is_string());
    }
}
