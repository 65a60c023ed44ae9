use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::quote::{Quote, VehicleCheck, VehicleServiceRequest};

/// Request para crear una cotización de inspección.
/// El checklist y los trabajos solicitados se insertan junto con la
/// cotización en una sola transacción.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub client_name: String,

    pub notes: Option<String>,

    pub repair_estimate: Decimal,

    #[serde(default)]
    pub purchase_check: bool,

    #[serde(default)]
    pub full_inspection: bool,

    pub quote_date: NaiveDate,

    pub check: VehicleCheck,
    pub requested_services: VehicleServiceRequest,
}

/// Request para actualizar una cotización. Si `check` o
/// `requested_services` vienen, las filas hijas previas se eliminan y
/// recrean completas (reemplazo destructivo).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuoteRequest {
    #[validate(length(min = 1, max = 200))]
    pub client_name: Option<String>,

    pub notes: Option<String>,
    pub repair_estimate: Option<Decimal>,
    pub purchase_check: Option<bool>,
    pub full_inspection: Option<bool>,
    pub quote_date: Option<NaiveDate>,

    pub check: Option<VehicleCheck>,
    pub requested_services: Option<VehicleServiceRequest>,
}

/// Response de cotización para listados
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub client_name: String,
    pub notes: Option<String>,
    pub repair_estimate: Decimal,
    pub purchase_check: bool,
    pub full_inspection: bool,
    pub quote_date: NaiveDate,
    pub responsible_user: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Response de cotización con hijos expandidos
#[derive(Debug, Serialize)]
pub struct QuoteDetailResponse {
    #[serde(flatten)]
    pub quote: QuoteResponse,
    pub check: Option<VehicleCheck>,
    pub requested_services: Option<VehicleServiceRequest>,
}

/// Agregados de cotizaciones para el dashboard
#[derive(Debug, Serialize)]
pub struct QuoteStatsResponse {
    pub total: i64,
    pub purchase_checks: i64,
    pub repair_estimate_total: Decimal,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            vehicle_id: quote.vehicle_id,
            client_name: quote.client_name,
            notes: quote.notes,
            repair_estimate: quote.repair_estimate,
            purchase_check: quote.purchase_check,
            full_inspection: quote.full_inspection,
            quote_date: quote.quote_date,
            responsible_user: quote.responsible_user,
            created_at: quote.created_at,
        }
    }
}
