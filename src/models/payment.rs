//! Modelo de Payment
//!
//! Un pago referencia exactamente uno de {contrato, cotización}; la
//! exclusividad se valida en la capa de servicio, no en la BD. Registrar
//! un pago contra un contrato dispara la cascada de estatus (§ contract).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Pago - mapea a la tabla payments
#[derive(Debug, Clone, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub contract_id: Option<Uuid>,
    pub quote_id: Option<Uuid>,
    pub amount: Decimal,
    pub method: String,
    pub payment_date: NaiveDate,
    pub voucher_reference: Option<String>,
    pub voucher_image: Option<String>,
    pub responsible_user: Uuid,
    pub created_at: DateTime<Utc>,
}
