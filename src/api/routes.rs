// 🛣️ Routes - /v1 handlers
//
// Aggregated responses (headquarters branches, country listings) come back
// 200 when every candidate was fetched and 206 with a `warnings` list when
// some were not.

use super::error::ApiError;
use super::state::AppState;
use super::API_PREFIX;
use crate::aggregator::AggregationResult;
use crate::country;
use crate::directory::BankLookup;
use crate::record::{BankRecord, BankSummary};
use crate::validation::BankRecordPayload;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete router
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/swift-codes", post(add_bank))
        .route("/swift-codes/", post(add_bank))
        .route(
            "/swift-codes/:swift_code",
            get(get_bank).delete(delete_bank),
        )
        .route("/swift-codes/country/:country_iso2", get(get_country));

    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// RESPONSE BODIES
// ============================================================================

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(MessageResponse {
            message: message.into(),
        })
    }
}

#[derive(Debug, Serialize)]
struct HeadquartersResponse {
    #[serde(flatten)]
    record: BankRecord,
    branches: Vec<BankSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CountryResponse {
    #[serde(rename = "countryISO2")]
    country_iso2: String,
    country_name: String,
    swift_codes: Vec<BankSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

fn aggregated_status(result: &AggregationResult) -> StatusCode {
    if result.is_complete() {
        StatusCode::OK
    } else {
        StatusCode::PARTIAL_CONTENT
    }
}

/// Collected records in code order
fn summaries(result: &AggregationResult) -> Vec<BankSummary> {
    let mut records: Vec<&BankRecord> = result.collected.iter().collect();
    records.sort_by(|a, b| a.swift_code.cmp(&b.swift_code));
    records.into_iter().map(BankRecord::summary).collect()
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /v1/health
async fn health(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    state
        .directory
        .health()
        .await
        .map_err(|e| ApiError::Internal(format!("store unavailable: {}", e)))?;
    Ok(MessageResponse::new("OK"))
}

/// GET /v1/swift-codes/:swift_code
async fn get_bank(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Response, ApiError> {
    let code = state.validator.validate_swift_code(&swift_code)?;
    let ctx = state.request_context();

    let found = state
        .directory
        .lookup(&ctx, &code)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("the SWIFT code {} was not found", code)))?;

    match found {
        BankLookup::Branch(record) => Ok((StatusCode::OK, Json(record)).into_response()),
        BankLookup::Headquarters { record, branches } => {
            let body = HeadquartersResponse {
                record,
                branches: summaries(&branches),
                warnings: branches.failure_descriptions(),
            };
            Ok((aggregated_status(&branches), Json(body)).into_response())
        }
    }
}

/// GET /v1/swift-codes/country/:country_iso2
async fn get_country(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> Result<Response, ApiError> {
    let country_iso2 = state.validator.validate_country_code(&country_iso2)?;
    let ctx = state.request_context();

    let result = state.directory.resolve_country(&ctx, &country_iso2).await?;

    let body = CountryResponse {
        country_name: country::country_name(&country_iso2)
            .unwrap_or_default()
            .to_string(),
        country_iso2,
        swift_codes: summaries(&result),
        warnings: result.failure_descriptions(),
    };
    Ok((aggregated_status(&result), Json(body)).into_response())
}

/// POST /v1/swift-codes
async fn add_bank(
    State(state): State<AppState>,
    payload: Result<Json<BankRecordPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        ApiError::BadRequest(format!("invalid payload: {}", rejection.body_text()))
    })?;

    let record = state.validator.validate_record(&payload)?;
    state.directory.add(record).await?;

    Ok((
        StatusCode::CREATED,
        MessageResponse::new("bank data successfully added"),
    ))
}

/// DELETE /v1/swift-codes/:swift_code
async fn delete_bank(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let code = state.validator.validate_swift_code(&swift_code)?;
    state.directory.remove(&code).await?;
    Ok(MessageResponse::new("bank data successfully deleted"))
}
