use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::contract::Contract;
use crate::dto::quote_dto::QuoteResponse;
use crate::dto::vehicle_dto::VehicleResponse;

/// Servicio elegido al crear/actualizar un contrato. El precio se copia
/// del catálogo en ese momento (snapshot, no join en vivo).
#[derive(Debug, Serialize, Deserialize)]
pub struct ContractServiceInput {
    pub service_id: Uuid,
}

/// Request para crear un contrato
#[derive(Debug, Deserialize, Validate)]
pub struct CreateContractRequest {
    #[validate(length(min = 1, max = 200))]
    pub client_name: String,

    #[validate(length(min = 1, max = 300))]
    pub client_address: String,

    pub client_phone: Option<String>,

    #[validate(email)]
    pub client_email: Option<String>,

    #[serde(default)]
    pub privacy_consent: bool,

    pub vehicle_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,

    #[validate(length(min = 1))]
    pub services: Vec<ContractServiceInput>,
}

/// Request para actualizar un contrato. Si `services` viene, el conjunto
/// de partidas se reemplaza completo (delete-all, insert-new).
/// `status_override` es el único camino de escritura directa del estatus
/// fuera de la cascada de pagos.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateContractRequest {
    #[validate(length(min = 1, max = 200))]
    pub client_name: Option<String>,

    #[validate(length(min = 1, max = 300))]
    pub client_address: Option<String>,

    pub client_phone: Option<String>,

    #[validate(email)]
    pub client_email: Option<String>,

    pub privacy_consent: Option<bool>,
    pub end_date: Option<NaiveDate>,
    pub services: Option<Vec<ContractServiceInput>>,
    pub status_override: Option<String>,
}

/// Filtros de listado/búsqueda de contratos
#[derive(Debug, Deserialize)]
pub struct ContractFilters {
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Response de contrato para listados
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub id: Uuid,
    pub contract_number: i64,
    pub client_name: String,
    pub vehicle_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
}

/// Partida de servicio expandida con el nombre del catálogo
#[derive(Debug, Serialize)]
pub struct ContractServiceLine {
    pub id: Uuid,
    pub service_id: Uuid,
    pub service_name: String,
    pub price: Decimal,
}

/// Proyección del usuario responsable (sin datos sensibles)
#[derive(Debug, Serialize)]
pub struct ResponsibleUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Contrato con todas las relaciones expandidas. Este objeto es el que
/// consume el renderizador de PDF: llega completamente resuelto.
#[derive(Debug, Serialize)]
pub struct ContractDetailResponse {
    pub id: Uuid,
    pub contract_number: i64,
    pub client_name: String,
    pub client_address: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub privacy_consent: bool,
    pub vehicle: VehicleResponse,
    pub quote: Option<QuoteResponse>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub responsible_user: ResponsibleUser,
    pub qr_code: String,
    pub services: Vec<ContractServiceLine>,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Conteo de contratos por estatus (dashboard)
#[derive(Debug, Serialize)]
pub struct ContractStatsResponse {
    pub current_and_paid: i64,
    pub current_and_in_debt: i64,
    pub expired: i64,
}

impl From<Contract> for ContractResponse {
    fn from(contract: Contract) -> Self {
        Self {
            id: contract.id,
            contract_number: contract.contract_number,
            client_name: contract.client_name,
            vehicle_id: contract.vehicle_id,
            quote_id: contract.quote_id,
            start_date: contract.start_date,
            end_date: contract.end_date,
            status: contract.status,
            qr_code: contract.qr_code,
            created_at: contract.created_at,
        }
    }
}
