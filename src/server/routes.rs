//! HTTP surface of the records backend.
//!
//! - `GET /health`: Health check
//! - `GET /records`: List every record
//! - `POST /records`: Append a record (201)
//! - `PUT /records/{id}`: Replace a record
//! - `DELETE /records/{id}`: Delete a record
//!
//! All record responses use the `{success, data | message | error}` envelope.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use fuel_track_core::{ApiResponse, FuelRecord};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::sheet::{SheetError, SheetStore};

const CREATE_REQUIRED: &[&str] = &["id", "date", "pricePerGallon", "gallons", "odometerReading"];
const UPDATE_REQUIRED: &[&str] = &["date", "pricePerGallon", "gallons", "odometerReading"];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sheet: Arc<SheetStore>,
}

/// Builds the router with CORS open to every origin, method and header.
pub fn router(sheet: Arc<SheetStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/records", get(list_records).post(create_record))
        .route("/records/{id}", put(update_record).delete(delete_record))
        .with_state(AppState { sheet })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_records(State(state): State<AppState>) -> Response {
    match state.sheet.all().await {
        Ok(records) => (StatusCode::OK, Json(ApiResponse::ok(records))).into_response(),
        Err(e) => sheet_failure(e),
    }
}

async fn create_record(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let record = match parse_record(body, CREATE_REQUIRED) {
        Ok(record) => record,
        Err(response) => return response,
    };

    match state.sheet.add(record).await {
        Ok(record) => {
            tracing::info!("Added record {}", record.id);
            (StatusCode::CREATED, Json(ApiResponse::ok(record))).into_response()
        }
        Err(e) => sheet_failure(e),
    }
}

async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if let Some(obj) = body.as_object_mut() {
        obj.insert("id".to_string(), Value::String(id.clone()));
    }
    let record = match parse_record(body, UPDATE_REQUIRED) {
        Ok(record) => record,
        Err(response) => return response,
    };

    match state.sheet.update(&id, record).await {
        Ok(record) => {
            tracing::info!("Updated record {}", id);
            (StatusCode::OK, Json(ApiResponse::ok(record))).into_response()
        }
        Err(e) => sheet_failure(e),
    }
}

async fn delete_record(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.sheet.delete(&id).await {
        Ok(()) => {
            tracing::info!("Deleted record {}", id);
            (
                StatusCode::OK,
                Json(ApiResponse::<()>::message("Record deleted")),
            )
                .into_response()
        }
        Err(e) => sheet_failure(e),
    }
}

/// Checks required fields, then decodes the record.
fn parse_record(body: Value, required: &[&str]) -> Result<FuelRecord, Response> {
    if required.iter().any(|field| !is_present(body.get(*field))) {
        return Err(failure(StatusCode::BAD_REQUEST, "Missing required fields"));
    }

    serde_json::from_value(body)
        .map_err(|e| failure(StatusCode::BAD_REQUEST, &format!("Invalid record: {}", e)))
}

/// Missing, null, false, empty strings and zero all count as absent.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}

fn sheet_failure(e: SheetError) -> Response {
    match e {
        SheetError::NotFound(_) => failure(StatusCode::NOT_FOUND, "Record not found"),
        e => {
            tracing::error!("Sheet error: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn failure(status: StatusCode, error: &str) -> Response {
    (status, Json(ApiResponse::<()>::error(error))).into_response()
}
