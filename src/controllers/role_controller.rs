use crate::dto::common::ApiResponse;
use crate::dto::role_dto::{CreateRoleRequest, PermissionResponse, RoleResponse, UpdateRoleRequest};
use crate::models::auth::AuthSession;
use crate::models::role::Role;
use crate::repositories::role_repository::RoleRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{integrity_error, AppError};
use crate::utils::permissions::{display_permission, normalize_permission, require_permission, PermissionName};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Administración de roles y permisos. La administración de identidad
/// completa (usuarios, roles, permisos) se gobierna con los permisos de
/// usuarios.
pub struct RoleController {
    repository: RoleRepository,
    users: UserRepository,
}

impl RoleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RoleRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Resolver nombres de permiso (visibles o canónicos) a ids de
    /// catálogo; los desconocidos son un error del caller.
    async fn resolve_permission_ids(&self, names: &[String]) -> Result<Vec<Uuid>, AppError> {
        let mut canonical = Vec::with_capacity(names.len());
        for name in names {
            let key = normalize_permission(name)
                .ok_or_else(|| AppError::BadRequest(format!("Permiso desconocido: '{}'", name)))?;
            canonical.push(key.to_string());
        }

        let ids = self.repository.permission_ids_by_names(&canonical).await?;
        if ids.len() != canonical.len() {
            return Err(AppError::Internal(
                "El catálogo de permisos no está sembrado por completo".to_string(),
            ));
        }

        Ok(ids)
    }

    async fn to_response(&self, role: Role) -> Result<RoleResponse, AppError> {
        let permissions = self.repository.permission_names_for_role(role.id).await?;
        Ok(RoleResponse {
            id: role.id,
            name: role.name,
            permissions,
            created_at: role.created_at,
        })
    }

    pub async fn create(
        &self,
        session: &AuthSession,
        request: CreateRoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::CreateUsers)?;
        request.validate()?;

        if self.repository.name_exists(&request.name, None).await? {
            return Err(AppError::Conflict(
                "Ya existe un rol con ese nombre".to_string(),
            ));
        }

        let permission_ids = self.resolve_permission_ids(&request.permissions).await?;
        let role = self
            .repository
            .create_with_permissions(request.name, permission_ids)
            .await?;

        let response = self.to_response(role).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Rol creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        session: &AuthSession,
        id: Uuid,
    ) -> Result<RoleResponse, AppError> {
        require_permission(&session.permissions, PermissionName::ViewUsers)?;

        let role = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rol no encontrado".to_string()))?;

        self.to_response(role).await
    }

    pub async fn list(&self, session: &AuthSession) -> Result<Vec<RoleResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::ViewUsers)?;

        let roles = self.repository.list().await?;
        let mut responses = Vec::with_capacity(roles.len());
        for role in roles {
            responses.push(self.to_response(role).await?);
        }

        Ok(responses)
    }

    /// Actualizar un rol. Si vienen permisos, el conjunto completo se
    /// reemplaza (delete-all, insert-new) atómicamente.
    pub async fn update(
        &self,
        session: &AuthSession,
        id: Uuid,
        request: UpdateRoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::EditUsers)?;
        request.validate()?;

        let mut role = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rol no encontrado".to_string()))?;

        if let Some(name) = request.name {
            if self.repository.name_exists(&name, Some(id)).await? {
                return Err(AppError::Conflict(
                    "Ya existe un rol con ese nombre".to_string(),
                ));
            }
            role = self.repository.rename(id, name).await?;
        }

        if let Some(permissions) = &request.permissions {
            let permission_ids = self.resolve_permission_ids(permissions).await?;
            self.repository.replace_permissions(id, permission_ids).await?;
        }

        let response = self.to_response(role).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Rol actualizado exitosamente".to_string(),
        ))
    }

    /// Guarda de integridad: un rol con usuarios asignados no se elimina
    pub async fn delete(&self, session: &AuthSession, id: Uuid) -> Result<(), AppError> {
        require_permission(&session.permissions, PermissionName::DeleteUsers)?;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Rol no encontrado".to_string()));
        }

        let assigned = self.users.count_by_role(id).await?;
        ensure_role_deletable(assigned)?;

        self.repository.delete(id).await
    }

    // --- Permisos ---

    pub async fn list_permissions(
        &self,
        session: &AuthSession,
    ) -> Result<Vec<PermissionResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::ViewUsers)?;

        let permissions = self.repository.list_permissions().await?;
        Ok(permissions
            .into_iter()
            .map(|p| PermissionResponse {
                id: p.id,
                display_name: display_permission(&p.name).map(|s| s.to_string()),
                name: p.name,
            })
            .collect())
    }

    /// Guarda de integridad: un permiso referenciado por algún rol no se
    /// elimina
    pub async fn delete_permission(&self, session: &AuthSession, id: Uuid) -> Result<(), AppError> {
        require_permission(&session.permissions, PermissionName::DeleteUsers)?;

        if self.repository.find_permission_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Permiso no encontrado".to_string()));
        }

        let links = self.repository.count_role_links_for_permission(id).await?;
        ensure_permission_deletable(links)?;

        self.repository.delete_permission(id).await
    }
}

/// Un rol referenciado por al menos un usuario no puede eliminarse
fn ensure_role_deletable(assigned_users: i64) -> Result<(), AppError> {
    if assigned_users > 0 {
        return Err(integrity_error(
            "el rol",
            &format!("tiene {} usuario(s) asignado(s)", assigned_users),
        ));
    }

    Ok(())
}

/// Un permiso vinculado a algún rol no puede eliminarse
fn ensure_permission_deletable(role_links: i64) -> Result<(), AppError> {
    if role_links > 0 {
        return Err(integrity_error(
            "el permiso",
            &format!("está asignado a {} rol(es)", role_links),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_with_users_is_not_deletable() {
        let err = ensure_role_deletable(3).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_role_without_users_is_deletable() {
        assert!(ensure_role_deletable(0).is_ok());
    }

    #[test]
    fn test_linked_permission_is_not_deletable() {
        let err = ensure_permission_deletable(1).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_unlinked_permission_is_deletable() {
        assert!(ensure_permission_deletable(0).is_ok());
    }
}
