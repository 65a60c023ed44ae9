use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::quote_controller::QuoteController;
use crate::dto::common::ApiResponse;
use crate::dto::quote_dto::{
    CreateQuoteRequest, QuoteDetailResponse, QuoteResponse, QuoteStatsResponse, UpdateQuoteRequest,
};
use crate::models::auth::AuthSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_quote_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quote))
        .route("/", get(list_quotes))
        .route("/stats", get(quote_stats))
        .route("/:id", get(get_quote))
        .route("/:id", put(update_quote))
        .route("/:id", delete(delete_quote))
}

async fn create_quote(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    let response = controller.create(&session, request).await?;
    Ok(Json(response))
}

async fn get_quote(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuoteDetailResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    let response = controller.get_by_id(&session, id).await?;
    Ok(Json(response))
}

async fn list_quotes(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<QuoteResponse>>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    let response = controller.list(&session).await?;
    Ok(Json(response))
}

async fn quote_stats(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<QuoteStatsResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    let response = controller.stats(&session).await?;
    Ok(Json(response))
}

async fn update_quote(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    let response = controller.update(&session, id, request).await?;
    Ok(Json(response))
}

async fn delete_quote(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = QuoteController::new(state.pool.clone());
    controller.delete(&session, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Cotización eliminada exitosamente"
    })))
}
