//! Middleware de autenticación
//!
//! Extrae el token de sesión (cookie `auth_token` o header Bearer), lo
//! verifica y deposita la sesión como extensión del request. Los
//! controllers reciben la sesión explícitamente: ningún chequeo de
//! permisos depende de estado global.

use axum::{
    extract::{Request, State},
    http::header::{AUTHORIZATION, COOKIE},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::models::auth::AuthSession;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{
    extract_token_from_cookie, extract_token_from_header, verify_token, JwtConfig,
};

/// Middleware aplicado a todas las rutas de la API salvo el login
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();

    // Primero la cookie de sesión, luego el header Authorization
    let token = headers
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_token_from_cookie)
        .map(|t| t.to_string())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| extract_token_from_header(h).ok())
                .map(|t| t.to_string())
        })
        .ok_or_else(|| AppError::Unauthorized("Sesión requerida".to_string()))?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(&token, &jwt_config)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Jwt("Token con sujeto inválido".to_string()))?;

    let session = AuthSession::new(user_id, claims.email, claims.permissions);
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
