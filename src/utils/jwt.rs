//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para la emisión y verificación
//! de los tokens de sesión. El payload embebe la lista de permisos
//! canónicos que consume la guardia de autorización.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::environment::EnvironmentConfig,
    utils::errors::AppError,
};

/// Claims del token de sesión
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,              // user_id
    pub email: String,
    pub permissions: Vec<String>, // claves canónicas de permisos
    pub exp: usize,               // expiration timestamp
    pub iat: usize,               // issued at timestamp
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_days: i64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration_days: config.jwt_expiration_days,
        }
    }
}

/// Generar token de sesión para un usuario
pub fn generate_token(
    user_id: Uuid,
    email: &str,
    permissions: Vec<String>,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::days(config.expiration_days);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        permissions,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar el token de sesión
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<JwtClaims>(
        token,
        &decoding_key,
        &Validation::default(),
    )
    .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Jwt("Header Authorization debe comenzar con 'Bearer '".to_string()));
    }

    let token = &auth_header[7..]; // Remover "Bearer "
    if token.is_empty() {
        return Err(AppError::Jwt("Token no puede estar vacío".to_string()));
    }

    Ok(token)
}

/// Extraer el token de sesión del header Cookie
pub fn extract_token_from_cookie(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|part| {
        let part = part.trim();
        part.strip_prefix("auth_token=").filter(|v| !v.is_empty())
    })
}

/// Construir el valor Set-Cookie de la sesión (HttpOnly, 7 días, path /)
pub fn session_cookie(token: &str, config: &JwtConfig) -> String {
    let max_age = config.expiration_days * 24 * 60 * 60;
    format!(
        "auth_token={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        token, max_age
    )
}

/// Cookie que invalida la sesión (logout)
pub fn clear_session_cookie() -> String {
    "auth_token=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-for-unit-tests".to_string(),
            expiration_days: 7,
        }
    }

    #[test]
    fn test_generate_and_verify_roundtrip() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let permissions = vec!["contracts:view".to_string(), "qr:search".to_string()];

        let token = generate_token(user_id, "admin@taller.mx", permissions.clone(), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "admin@taller.mx");
        assert_eq!(claims.permissions, permissions);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let config = test_config();
        let other = JwtConfig {
            secret: "otro-secreto".to_string(),
            expiration_days: 7,
        };

        let token = generate_token(Uuid::new_v4(), "a@b.c", vec![], &config).unwrap();
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_extract_token_from_cookie() {
        assert_eq!(
            extract_token_from_cookie("theme=dark; auth_token=abc.def.ghi; lang=es"),
            Some("abc.def.ghi")
        );
        assert_eq!(extract_token_from_cookie("theme=dark"), None);
        assert_eq!(extract_token_from_cookie("auth_token="), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", &test_config());
        assert!(cookie.starts_with("auth_token=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800")); // 7 días
    }
}
