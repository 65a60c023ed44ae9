use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::contract_controller::ContractController;
use crate::dto::common::ApiResponse;
use crate::dto::contract_dto::{
    ContractDetailResponse, ContractFilters, ContractResponse, ContractStatsResponse,
    CreateContractRequest, UpdateContractRequest,
};
use crate::models::auth::AuthSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contract_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_contract))
        .route("/", get(list_contracts))
        .route("/stats", get(contract_stats))
        .route("/:id", get(get_contract))
        .route("/:id", put(update_contract))
        .route("/:id", delete(delete_contract))
}

async fn create_contract(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(request): Json<CreateContractRequest>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.create(&session, request).await?;
    Ok(Json(response))
}

async fn get_contract(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractDetailResponse>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.get_by_id(&session, id).await?;
    Ok(Json(response))
}

/// Listado con filtros opcionales: `?status=` por estatus exacto y
/// `?search=` por nombre de cliente, placa o folio CNT-N
async fn list_contracts(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Query(filters): Query<ContractFilters>,
) -> Result<Json<Vec<ContractResponse>>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.list(&session, filters).await?;
    Ok(Json(response))
}

async fn contract_stats(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<ContractStatsResponse>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.stats(&session).await?;
    Ok(Json(response))
}

async fn update_contract(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateContractRequest>,
) -> Result<Json<ApiResponse<ContractResponse>>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.update(&session, id, request).await?;
    Ok(Json(response))
}

async fn delete_contract(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    controller.delete(&session, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Contrato eliminado exitosamente"
    })))
}
