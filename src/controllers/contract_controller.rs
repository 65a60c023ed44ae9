use crate::dto::common::ApiResponse;
use crate::dto::contract_dto::{
    ContractDetailResponse, ContractFilters, ContractResponse, ContractServiceLine,
    ContractStatsResponse, CreateContractRequest, ResponsibleUser, UpdateContractRequest,
};
use crate::models::auth::AuthSession;
use crate::models::contract::{Contract, ContractStatus};
use crate::repositories::contract_repository::ContractRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::permissions::{require_permission, PermissionName};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct ContractController {
    repository: ContractRepository,
    vehicles: VehicleRepository,
    quotes: QuoteRepository,
    users: UserRepository,
    payments: PaymentRepository,
}

impl ContractController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ContractRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            quotes: QuoteRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        session: &AuthSession,
        request: CreateContractRequest,
    ) -> Result<ApiResponse<ContractResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::CreateContracts)?;
        request.validate()?;

        if self.vehicles.find_by_id(request.vehicle_id).await?.is_none() {
            return Err(AppError::BadRequest(
                "El vehículo indicado no existe".to_string(),
            ));
        }

        if let Some(quote_id) = request.quote_id {
            if self.quotes.find_by_id(quote_id).await?.is_none() {
                return Err(AppError::BadRequest(
                    "La cotización indicada no existe".to_string(),
                ));
            }
        }

        let contract = self.repository.create(request, session.user_id).await?;

        Ok(ApiResponse::success_with_message(
            contract.into(),
            "Contrato creado exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        session: &AuthSession,
        filters: ContractFilters,
    ) -> Result<Vec<ContractResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::ViewContracts)?;

        if let Some(status) = &filters.status {
            if ContractStatus::from_str(status).is_none() {
                return Err(AppError::BadRequest(format!("Estatus inválido: {}", status)));
            }
        }

        let contracts = self.repository.list(&filters).await?;
        Ok(contracts.into_iter().map(Into::into).collect())
    }

    /// Contrato con todas las relaciones resueltas: este es el objeto
    /// que consume el renderizador de PDF.
    pub async fn get_by_id(
        &self,
        session: &AuthSession,
        id: Uuid,
    ) -> Result<ContractDetailResponse, AppError> {
        require_permission(&session.permissions, PermissionName::ViewContracts)?;

        let contract = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contrato no encontrado".to_string()))?;

        self.expand(contract).await
    }

    /// Resolución de un token QR escaneado/tecleado a su contrato.
    /// Gated por el permiso de búsqueda QR, no por el de contratos.
    pub async fn find_by_qr_token(
        &self,
        session: &AuthSession,
        token: &str,
    ) -> Result<ContractDetailResponse, AppError> {
        require_permission(&session.permissions, PermissionName::QrSearch)?;

        let contract = self
            .repository
            .find_by_qr_code(token)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Ningún contrato corresponde al código '{}'", token))
            })?;

        self.expand(contract).await
    }

    pub async fn update(
        &self,
        session: &AuthSession,
        id: Uuid,
        request: UpdateContractRequest,
    ) -> Result<ApiResponse<ContractResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::EditContracts)?;
        request.validate()?;

        let contract = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            contract.into(),
            "Contrato actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, session: &AuthSession, id: Uuid) -> Result<(), AppError> {
        require_permission(&session.permissions, PermissionName::DeleteContracts)?;
        self.repository.delete(id).await?;
        Ok(())
    }

    /// Conteo de contratos por estatus para el dashboard
    pub async fn stats(&self, session: &AuthSession) -> Result<ContractStatsResponse, AppError> {
        require_permission(&session.permissions, PermissionName::ViewDashboard)?;

        let counts = self.repository.stats().await?;
        let mut stats = ContractStatsResponse {
            current_and_paid: 0,
            current_and_in_debt: 0,
            expired: 0,
        };

        for row in counts {
            match ContractStatus::from_str(&row.status) {
                Some(ContractStatus::CurrentAndPaid) => stats.current_and_paid = row.count,
                Some(ContractStatus::CurrentAndInDebt) => stats.current_and_in_debt = row.count,
                Some(ContractStatus::Expired) => stats.expired = row.count,
                None => {}
            }
        }

        Ok(stats)
    }

    /// Expandir un contrato con vehículo, partidas, cotización de origen
    /// y proyección del responsable. El usuario responsable puede haber
    /// sido eliminado: la referencia cruda se conserva sin nombre.
    async fn expand(&self, contract: Contract) -> Result<ContractDetailResponse, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(contract.vehicle_id)
            .await?
            .ok_or_else(|| AppError::Internal("Contrato sin vehículo asociado".to_string()))?;

        let quote = match contract.quote_id {
            Some(quote_id) => self.quotes.find_by_id(quote_id).await?.map(Into::into),
            None => None,
        };

        let responsible = match self.users.find_by_id(contract.responsible_user).await? {
            Some(user) => ResponsibleUser {
                id: user.id,
                name: Some(user.full_name()),
                email: Some(user.email),
            },
            None => ResponsibleUser {
                id: contract.responsible_user,
                name: None,
                email: None,
            },
        };

        let services: Vec<ContractServiceLine> = self
            .repository
            .line_items_with_names(contract.id)
            .await?
            .into_iter()
            .map(|item| ContractServiceLine {
                id: item.id,
                service_id: item.service_id,
                service_name: item.service_name,
                price: item.price,
            })
            .collect();

        let total_amount = self.repository.total_amount(contract.id).await?;
        let paid_amount = self.payments.paid_amount(contract.id).await?;

        Ok(ContractDetailResponse {
            id: contract.id,
            contract_number: contract.contract_number,
            client_name: contract.client_name,
            client_address: contract.client_address,
            client_phone: contract.client_phone,
            client_email: contract.client_email,
            privacy_consent: contract.privacy_consent,
            vehicle: vehicle.into(),
            quote,
            start_date: contract.start_date,
            end_date: contract.end_date,
            status: contract.status,
            responsible_user: responsible,
            qr_code: contract.qr_code,
            services,
            total_amount,
            paid_amount,
            created_at: contract.created_at,
        })
    }
}
