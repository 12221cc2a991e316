use axum::{routing::get, Json, Router};
use registry::AppRegistry;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;

pub fn build_openapi_routers() -> Router<AppRegistry> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
