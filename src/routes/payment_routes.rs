use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::payment_controller::PaymentController;
use crate::dto::common::ApiResponse;
use crate::dto::payment_dto::{CreatePaymentRequest, CreatePaymentResult, PaymentResponse};
use crate::models::auth::AuthSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_payment))
        .route("/contract/:id", get(list_by_contract))
        .route("/quote/:id", get(list_by_quote))
        .route("/:id", delete(delete_payment))
}

async fn create_payment(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<ApiResponse<CreatePaymentResult>>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let response = controller.create(&session, request).await?;
    Ok(Json(response))
}

async fn list_by_contract(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let response = controller.list_by_contract(&session, id).await?;
    Ok(Json(response))
}

async fn list_by_quote(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let response = controller.list_by_quote(&session, id).await?;
    Ok(Json(response))
}

async fn delete_payment(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    controller.delete(&session, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Pago eliminado exitosamente"
    })))
}
