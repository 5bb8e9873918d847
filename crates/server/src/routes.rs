use std::sync::Arc;

use axum::{routing::get, Json, Router};
use configs::RoutesConfig;
use service::item::{DynItemService, ItemRepository, ItemService};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{info, Level};
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod items;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub items: DynItemService,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { items: ItemService::new(repo) }
    }
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is alive", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router, mounting only the enabled route groups.
pub fn build_router(state: ServerState, routes: &RoutesConfig, cors: CorsLayer) -> Router {
    let mut app: Router<ServerState> = Router::new().route("/api-docs/openapi.json", get(openapi_json));

    if routes.health {
        app = app.route("/health", get(health));
    }

    if routes.items {
        info!("loading items routes");
        app = app
            .route("/items", get(items::list).post(items::create))
            .route("/items/:id", get(items::get).put(items::update).delete(items::delete));
    }

    app.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::{to_bytes, Body}, http::{Request, StatusCode}};
    use service::item::MemoryItemRepository;
    use tower::ServiceExt;

    fn app(routes: RoutesConfig) -> Router {
        let state = ServerState::new(Arc::new(MemoryItemRepository::new()));
        build_router(state, &routes, CorsLayer::very_permissive())
    }

    async fn status_of(app: Router, uri: &str) -> StatusCode {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn health_returns_pong() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let res = app(RoutesConfig::default()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let h: Health = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(h.status, "ok");
        assert_eq!(h.message, "pong");
        assert!(chrono::DateTime::parse_from_rfc3339(&h.timestamp).is_ok());
    }

    #[tokio::test]
    async fn disabled_groups_are_not_mounted() {
        let only_items = RoutesConfig { health: false, items: true };
        assert_eq!(status_of(app(only_items.clone()), "/health").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of(app(only_items), "/items").await, StatusCode::OK);

        let only_health = RoutesConfig { health: true, items: false };
        assert_eq!(status_of(app(only_health.clone()), "/items").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of(app(only_health), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_document_lists_item_paths() {
        let req = Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap();
        let res = app(RoutesConfig::default()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"]["/items"].is_object());
        assert!(doc["paths"]["/items/{id}"].is_object());
    }
}
