//! Servicio de autenticación
//!
//! Verifica credenciales contra la tabla de usuarios y arma la sesión:
//! rol → permisos vía la tabla de vínculos, nombres normalizados a clave
//! canónica una sola vez, al emitir la sesión. El error de credenciales
//! es idéntico para "email desconocido" y "contraseña incorrecta".

use bcrypt::verify;
use sqlx::PgPool;
use tracing::info;

use crate::models::auth::AuthenticatedUser;
use crate::repositories::role_repository::RoleRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{invalid_credentials_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::permissions::normalize_permission;

pub struct AuthService {
    users: UserRepository,
    roles: RoleRepository,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            roles: RoleRepository::new(pool),
            jwt_config,
        }
    }

    /// Autenticar por email y contraseña. Devuelve el usuario con su
    /// conjunto aplanado de permisos y el token de sesión firmado.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AuthenticatedUser, String), AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials_error)?;

        check_password(password, &user.password_hash)?;

        // Resolver rol → permisos y normalizar a claves canónicas;
        // nombres desconocidos se descartan
        let permissions: Vec<String> = self
            .roles
            .permission_names_for_role(user.role_id)
            .await?
            .iter()
            .filter_map(|name| normalize_permission(name))
            .map(|key| key.to_string())
            .collect();

        let token = generate_token(user.id, &user.email, permissions.clone(), &self.jwt_config)?;

        info!("🔓 Sesión emitida para {}", user.email);

        Ok((
            AuthenticatedUser {
                id: user.id,
                email: user.email.clone(),
                name: user.full_name(),
                permissions,
            },
            token,
        ))
    }
}

/// Verificar la contraseña contra el hash almacenado. Una contraseña
/// incorrecta produce el mismo error que un email desconocido.
fn check_password(password: &str, password_hash: &str) -> Result<(), AppError> {
    let valid = verify(password, password_hash)
        .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;

    if !valid {
        return Err(invalid_credentials_error());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Costo mínimo: el hash solo necesita ser verificable
    fn hash_of(password: &str) -> String {
        bcrypt::hash(password, 4).unwrap()
    }

    #[test]
    fn test_correct_password_passes() {
        let hash = hash_of("secreta123");
        assert!(check_password("secreta123", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_matches_unknown_email_error() {
        let hash = hash_of("secreta123");
        let wrong_password = check_password("otra-cosa", &hash).unwrap_err();
        let unknown_email = invalid_credentials_error();

        // Indistinguibles para el cliente: mismo variante, mismo mensaje
        assert!(matches!(wrong_password, AppError::Unauthorized(_)));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}
