use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::role_controller::RoleController;
use crate::dto::common::ApiResponse;
use crate::dto::role_dto::{CreateRoleRequest, PermissionResponse, RoleResponse, UpdateRoleRequest};
use crate::models::auth::AuthSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_role_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_role))
        .route("/", get(list_roles))
        .route("/:id", get(get_role))
        .route("/:id", put(update_role))
        .route("/:id", delete(delete_role))
}

/// Catálogo de permisos: solo lectura y eliminación (el sembrado es
/// parte del despliegue)
pub fn create_permission_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_permissions))
        .route("/:id", delete(delete_permission))
}

async fn create_role(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(request): Json<CreateRoleRequest>,
) -> Result<Json<ApiResponse<RoleResponse>>, AppError> {
    let controller = RoleController::new(state.pool.clone());
    let response = controller.create(&session, request).await?;
    Ok(Json(response))
}

async fn get_role(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoleResponse>, AppError> {
    let controller = RoleController::new(state.pool.clone());
    let response = controller.get_by_id(&session, id).await?;
    Ok(Json(response))
}

async fn list_roles(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<RoleResponse>>, AppError> {
    let controller = RoleController::new(state.pool.clone());
    let response = controller.list(&session).await?;
    Ok(Json(response))
}

async fn update_role(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<RoleResponse>>, AppError> {
    let controller = RoleController::new(state.pool.clone());
    let response = controller.update(&session, id, request).await?;
    Ok(Json(response))
}

async fn delete_role(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RoleController::new(state.pool.clone());
    controller.delete(&session, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Rol eliminado exitosamente"
    })))
}

async fn list_permissions(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<PermissionResponse>>, AppError> {
    let controller = RoleController::new(state.pool.clone());
    let response = controller.list_permissions(&session).await?;
    Ok(Json(response))
}

async fn delete_permission(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RoleController::new(state.pool.clone());
    controller.delete_permission(&session, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Permiso eliminado exitosamente"
    })))
}
