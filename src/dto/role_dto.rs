use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para crear un rol con su conjunto de permisos
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    /// Nombres de permiso (visibles o claves canónicas)
    pub permissions: Vec<String>,
}

/// Request para actualizar un rol. Si `permissions` viene, el conjunto
/// completo se reemplaza (delete-all, insert-new).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    pub permissions: Option<Vec<String>>,
}

/// Response de rol con permisos expandidos
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    /// Claves canónicas de los permisos otorgados
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Response de permiso del catálogo
#[derive(Debug, Serialize)]
pub struct PermissionResponse {
    pub id: Uuid,
    /// Clave canónica (ej. "contracts:view")
    pub name: String,
    /// Nombre visible (ej. "View_Contracts")
    pub display_name: Option<String>,
}
