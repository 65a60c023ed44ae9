//! Modelos de autenticación
//!
//! La sesión autenticada se inyecta como extensión de request por el
//! middleware y se pasa explícitamente a cada controller: las
//! verificaciones de permisos nunca dependen de estado ambiental.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Sesión autenticada derivada de un token válido
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub email: String,
    pub permissions: HashSet<String>,
}

impl AuthSession {
    pub fn new(user_id: Uuid, email: String, permissions: Vec<String>) -> Self {
        Self {
            user_id,
            email,
            permissions: permissions.into_iter().collect(),
        }
    }
}

/// Usuario autenticado tal como se devuelve al hacer login
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub permissions: Vec<String>,
}
