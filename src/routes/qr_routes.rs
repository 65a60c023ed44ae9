use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::contract_controller::ContractController;
use crate::dto::contract_dto::ContractDetailResponse;
use crate::models::auth::AuthSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_qr_router() -> Router<AppState> {
    Router::new().route("/:token", get(resolve_token))
}

/// Resolver un token QR (escaneado o tecleado) al contrato completo
async fn resolve_token(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(token): Path<String>,
) -> Result<Json<ContractDetailResponse>, AppError> {
    let controller = ContractController::new(state.pool.clone());
    let response = controller.find_by_qr_token(&session, &token).await?;
    Ok(Json(response))
}
