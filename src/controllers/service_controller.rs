use crate::dto::common::ApiResponse;
use crate::dto::service_dto::{CreateServiceRequest, ServiceResponse, UpdateServiceRequest};
use crate::models::auth::AuthSession;
use crate::repositories::service_repository::ServiceRepository;
use crate::utils::errors::AppError;
use crate::utils::permissions::{require_permission, PermissionName};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// CRUD del catálogo de servicios. El catálogo es dato de referencia:
/// se edita bajo los permisos de contratos (misma superficie en la
/// administración original).
pub struct ServiceController {
    repository: ServiceRepository,
}

impl ServiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ServiceRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        session: &AuthSession,
        request: CreateServiceRequest,
    ) -> Result<ApiResponse<ServiceResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::CreateContracts)?;
        request.validate()?;

        if request.base_price < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "El precio base no puede ser negativo".to_string(),
            ));
        }

        let service = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            service.into(),
            "Servicio agregado al catálogo".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        session: &AuthSession,
        id: Uuid,
    ) -> Result<ServiceResponse, AppError> {
        require_permission(&session.permissions, PermissionName::ViewContracts)?;

        let service = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Servicio no encontrado".to_string()))?;

        Ok(service.into())
    }

    pub async fn list(&self, session: &AuthSession) -> Result<Vec<ServiceResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::ViewContracts)?;

        let services = self.repository.list().await?;
        Ok(services.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        session: &AuthSession,
        id: Uuid,
        request: UpdateServiceRequest,
    ) -> Result<ApiResponse<ServiceResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::EditContracts)?;
        request.validate()?;

        if matches!(request.base_price, Some(p) if p < Decimal::ZERO) {
            return Err(AppError::BadRequest(
                "El precio base no puede ser negativo".to_string(),
            ));
        }

        // Nota: los contratos existentes conservan su precio congelado;
        // este cambio solo afecta contrataciones futuras
        let service = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            service.into(),
            "Servicio actualizado".to_string(),
        ))
    }

    pub async fn delete(&self, session: &AuthSession, id: Uuid) -> Result<(), AppError> {
        require_permission(&session.permissions, PermissionName::DeleteContracts)?;
        self.repository.delete(id).await?;
        Ok(())
    }
}
