use crate::dto::common::ApiResponse;
use crate::dto::quote_dto::{
    CreateQuoteRequest, QuoteDetailResponse, QuoteResponse, QuoteStatsResponse, UpdateQuoteRequest,
};
use crate::models::auth::AuthSession;
use crate::repositories::quote_repository::QuoteRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::permissions::{require_permission, PermissionName};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct QuoteController {
    repository: QuoteRepository,
    vehicles: VehicleRepository,
}

impl QuoteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: QuoteRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        session: &AuthSession,
        request: CreateQuoteRequest,
    ) -> Result<ApiResponse<QuoteResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::CreateQuotes)?;
        request.validate()?;

        if self.vehicles.find_by_id(request.vehicle_id).await?.is_none() {
            return Err(AppError::BadRequest(
                "El vehículo indicado no existe".to_string(),
            ));
        }

        let quote = self.repository.create(request, session.user_id).await?;

        Ok(ApiResponse::success_with_message(
            quote.into(),
            "Cotización creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        session: &AuthSession,
        id: Uuid,
    ) -> Result<QuoteDetailResponse, AppError> {
        require_permission(&session.permissions, PermissionName::ViewQuotes)?;

        let quote = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cotización no encontrada".to_string()))?;

        let check = self.repository.find_check(id).await?;
        let requested_services = self.repository.find_requested_services(id).await?;

        Ok(QuoteDetailResponse {
            quote: quote.into(),
            check,
            requested_services,
        })
    }

    pub async fn list(&self, session: &AuthSession) -> Result<Vec<QuoteResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::ViewQuotes)?;

        let quotes = self.repository.list().await?;
        Ok(quotes.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        session: &AuthSession,
        id: Uuid,
        request: UpdateQuoteRequest,
    ) -> Result<ApiResponse<QuoteResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::EditQuotes)?;
        request.validate()?;

        let quote = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            quote.into(),
            "Cotización actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, session: &AuthSession, id: Uuid) -> Result<(), AppError> {
        require_permission(&session.permissions, PermissionName::DeleteQuotes)?;
        self.repository.delete(id).await?;
        Ok(())
    }

    pub async fn stats(&self, session: &AuthSession) -> Result<QuoteStatsResponse, AppError> {
        require_permission(&session.permissions, PermissionName::ViewDashboard)?;

        let stats = self.repository.stats().await?;
        Ok(QuoteStatsResponse {
            total: stats.total,
            purchase_checks: stats.purchase_checks,
            repair_estimate_total: stats.repair_estimate_total,
        })
    }
}
