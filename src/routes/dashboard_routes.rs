use axum::{extract::State, routing::get, Extension, Json, Router};

use crate::controllers::contract_controller::ContractController;
use crate::controllers::quote_controller::QuoteController;
use crate::dto::dashboard_dto::DashboardStatsResponse;
use crate::models::auth::AuthSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/stats", get(dashboard_stats))
}

async fn dashboard_stats(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<DashboardStatsResponse>, AppError> {
    let contracts = ContractController::new(state.pool.clone())
        .stats(&session)
        .await?;
    let quotes = QuoteController::new(state.pool.clone())
        .stats(&session)
        .await?;

    Ok(Json(DashboardStatsResponse { contracts, quotes }))
}
