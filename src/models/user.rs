//! Modelo de User
//!
//! Usuarios administrativos del taller. Cada usuario referencia
//! exactamente un rol; el hash de contraseña nunca sale en respuestas.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Usuario - mapea a la tabla users
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
