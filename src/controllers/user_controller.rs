use crate::dto::common::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::models::auth::AuthSession;
use crate::repositories::role_repository::RoleRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::permissions::{require_permission, PermissionName};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct UserController {
    repository: UserRepository,
    roles: RoleRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            roles: RoleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        session: &AuthSession,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::CreateUsers)?;
        request.validate()?;

        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict(
                "Ya existe un usuario con ese email".to_string(),
            ));
        }

        if self.roles.find_by_id(request.role_id).await?.is_none() {
            return Err(AppError::BadRequest("El rol indicado no existe".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))?;

        let user = self
            .repository
            .create(
                request.first_name,
                request.last_name,
                request.email,
                password_hash,
                request.role_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        session: &AuthSession,
        id: Uuid,
    ) -> Result<UserResponse, AppError> {
        require_permission(&session.permissions, PermissionName::ViewUsers)?;

        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(user.into())
    }

    pub async fn list(&self, session: &AuthSession) -> Result<Vec<UserResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::ViewUsers)?;

        let users = self.repository.list().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        session: &AuthSession,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::EditUsers)?;
        request.validate()?;

        // Mismo chequeo de unicidad que al crear: el email solo puede
        // pertenecer al propio usuario
        if let Some(email) = &request.email {
            if let Some(existing) = self.repository.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::Conflict(
                        "Ya existe un usuario con ese email".to_string(),
                    ));
                }
            }
        }

        if let Some(role_id) = request.role_id {
            if self.roles.find_by_id(role_id).await?.is_none() {
                return Err(AppError::BadRequest("El rol indicado no existe".to_string()));
            }
        }

        let password_hash = match &request.password {
            Some(password) => Some(
                hash(password, DEFAULT_COST)
                    .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))?,
            ),
            None => None,
        };

        let user = self
            .repository
            .update(
                id,
                request.first_name,
                request.last_name,
                request.email,
                password_hash,
                request.role_id,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, session: &AuthSession, id: Uuid) -> Result<(), AppError> {
        require_permission(&session.permissions, PermissionName::DeleteUsers)?;
        self.repository.delete(id).await?;
        Ok(())
    }
}
