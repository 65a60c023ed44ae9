//! Modelos de Role y Permission
//!
//! Un rol es un conjunto nombrado de permisos (many-to-many vía
//! role_permissions). Las guardas de integridad viven en la capa de
//! servicio: un rol con usuarios asignados no se elimina, igual que un
//! permiso referenciado por algún rol.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Rol - mapea a la tabla roles
#[derive(Debug, Clone, FromRow)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Permiso - mapea a la tabla permissions (catálogo cerrado, sembrado).
/// La tabla role_permissions solo se toca vía SQL en el repositorio de
/// roles; no tiene modelo propio.
#[derive(Debug, Clone, FromRow)]
pub struct Permission {
    pub id: Uuid,
    pub name: String,
}
