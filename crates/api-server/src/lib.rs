use application::CatalogApp;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use domain::{DispatchRequest, DispatchResponse, RequestBody};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    catalog_app: Arc<CatalogApp>,
}

type QueryParams = Result<Query<HashMap<String, String>>, QueryRejection>;

/// Every resource route funnels into the dispatcher; only `/health`
/// and the JSON fallbacks are handled here.
pub fn router(catalog_app: Arc<CatalogApp>) -> Router {
    Router::new()
        .route("/health", get(health_check).fallback(health_method_not_allowed))
        .route("/:resource", any(dispatch_collection))
        .route("/:resource/:id", any(dispatch_member))
        .fallback(unknown_route)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { catalog_app })
}

async fn dispatch_collection(
    State(state): State<AppState>,
    method: Method,
    path: Result<Path<String>, PathRejection>,
    query: QueryParams,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let resource = match path {
        Ok(Path(resource)) => resource,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };
    forward(&state, method, resource, None, query, body).await
}

async fn dispatch_member(
    State(state): State<AppState>,
    method: Method,
    path: Result<Path<(String, String)>, PathRejection>,
    query: QueryParams,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let (resource, id) = match path {
        Ok(Path(segments)) => segments,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };
    forward(&state, method, resource, Some(id), query, body).await
}

async fn forward(
    state: &AppState,
    method: Method,
    resource: String,
    id: Option<String>,
    query: QueryParams,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let query = match query {
        Ok(Query(params)) => params.into_iter().collect(),
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };
    let body = match body {
        Ok(bytes) => request_body(&bytes),
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    let request = DispatchRequest {
        method: method.as_str().to_string(),
        resource,
        id,
        query,
        body,
    };
    into_response(state.catalog_app.dispatch(request).await)
}

fn request_body(bytes: &[u8]) -> RequestBody {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return RequestBody::Empty;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => RequestBody::Json(value),
        Err(e) => RequestBody::Malformed(e.to_string()),
    }
}

fn into_response(response: DispatchResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn health_method_not_allowed(method: Method) -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {method} not allowed on health"),
    )
}

async fn unknown_route() -> Response {
    error_response(StatusCode::NOT_FOUND, "Unknown route".to_string())
}

/// Failures raised before the dispatcher runs, in the dispatcher's error shape.
fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
