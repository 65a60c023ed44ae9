use axum::{
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    extract::State,
    Extension, Json, Router,
};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::models::auth::AuthSession;
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{clear_session_cookie, session_cookie, JwtConfig};

/// Rutas públicas (sin sesión)
pub fn create_public_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Rutas de sesión (detrás del middleware de autenticación)
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Login: verifica credenciales y deposita la sesión como cookie
/// HttpOnly de 7 días, además de devolver el usuario con sus permisos.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let jwt_config = JwtConfig::from(&state.config);
    let service = AuthService::new(state.pool.clone(), jwt_config.clone());
    let (user, token) = service.authenticate(&request.email, &request.password).await?;

    let cookie = session_cookie(&token, &jwt_config);

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(LoginResponse::ok(user)),
    ))
}

async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(serde_json::json!({
            "success": true,
            "message": "Sesión cerrada"
        })),
    )
}

/// Sesión actual derivada del token
async fn me(Extension(session): Extension<AuthSession>) -> Json<AuthSession> {
    Json(session)
}
