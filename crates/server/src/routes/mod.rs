use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::AppState;
use shared::{CreateDesignRequest, DesignPatch, StoredDesign};

/// Service info
pub async fn info() -> Json<Value> {
    Json(json!({
        "message": "3D Container Home Designer API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/designs, newest first
pub async fn list_designs(State(state): State<AppState>) -> Json<Vec<StoredDesign>> {
    Json(state.storage.list().await)
}

/// GET /api/designs/{id}
pub async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StoredDesign>> {
    Ok(Json(state.storage.get(&id).await?))
}

/// POST /api/designs
pub async fn create_design(
    State(state): State<AppState>,
    payload: Result<Json<CreateDesignRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StoredDesign>)> {
    let Json(request) = payload?;
    let design = state.storage.create(request).await?;
    Ok((StatusCode::CREATED, Json(design)))
}

/// PUT /api/designs/{id}
pub async fn update_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DesignPatch>, JsonRejection>,
) -> ApiResult<Json<StoredDesign>> {
    let Json(patch) = payload?;
    Ok(Json(state.storage.update(&id, patch).await?))
}

/// DELETE /api/designs/{id}
pub async fn delete_design(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.storage.delete(&id).await?;
    Ok(Json(json!({ "message": "Design deleted" })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::Router;
    use tower::ServiceExt;

    use super::*;
    use crate::storage::DesignStorage;

    fn app() -> Router {
        crate::build_router(AppState {
            storage: Arc::new(DesignStorage::in_memory()),
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn cabin() -> Value {
        json!({
            "name": "Cabin",
            "containers": [{
                "id": "container-1",
                "position": [0.0, 0.0, 0.0],
                "windowsDoors": [{
                    "id": "wd-1",
                    "type": "entry-door",
                    "wall": "front",
                    "offset": 0.0,
                    "width": 3.0,
                    "height": 6.67
                }]
            }],
            "slabDimensions": { "width": 40.0, "depth": 20.0 },
            "createdAt": "2024-01-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_health_and_info() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "3D Container Home Designer API");
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let app = app();
        let (status, created) = send(&app, Method::POST, "/api/designs", Some(cabin())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["name"], "Cabin");
        assert!(created["createdAt"].is_string());
        assert!(created["updatedAt"].is_string());
        assert_eq!(created["containers"][0]["windowsDoors"][0]["type"], "entry-door");

        let (status, fetched) = send(&app, Method::GET, &format!("/api/designs/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_without_name_is_400() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/designs",
            Some(json!({ "containers": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_with_unknown_wall_is_rejected() {
        let app = app();
        let mut design = cabin();
        design["containers"][0]["windowsDoors"][0]["wall"] = json!("roof");
        let (status, body) = send(&app, Method::POST, "/api/designs", Some(design)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["error"].as_str().unwrap().contains("roof"));

        let (_, list) = send(&app, Method::GET, "/api/designs", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_wrongly_typed_fields_are_400() {
        let app = app();
        let mut design = cabin();
        design["slabDimensions"]["width"] = json!("wide");
        let (status, body) = send(&app, Method::POST, "/api/designs", Some(design)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (_, created) = send(&app, Method::POST, "/api/designs", Some(cabin())).await;
        let uri = format!("/api/designs/{}", created["id"].as_str().unwrap());
        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({ "containers": [{ "id": "c", "position": "origin" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (_, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(fetched["containers"], created["containers"]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/designs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let app = app();
        let mut first = cabin();
        first["name"] = json!("First");
        let mut second = cabin();
        second["name"] = json!("Second");

        send(&app, Method::POST, "/api/designs", Some(first)).await;
        send(&app, Method::POST, "/api/designs", Some(second)).await;

        let (status, list) = send(&app, Method::GET, "/api/designs", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_get_missing_is_404() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/designs/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_put_partial_update() {
        let app = app();
        let (_, created) = send(&app, Method::POST, "/api/designs", Some(cabin())).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/designs/{id}"),
            Some(json!({ "slabDimensions": { "width": 80.0, "depth": 40.0 } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Cabin");
        assert_eq!(updated["slabDimensions"]["width"], 80.0);
        assert_eq!(updated["containers"], created["containers"]);
        assert_eq!(updated["createdAt"], created["createdAt"]);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/designs/missing",
            Some(json!({ "name": "X" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete() {
        let app = app();
        let (_, created) = send(&app, Method::POST, "/api/designs", Some(cabin())).await;
        let uri = format!("/api/designs/{}", created["id"].as_str().unwrap());

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Design deleted");

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
