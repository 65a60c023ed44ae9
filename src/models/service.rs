//! Modelo de Service (catálogo)
//!
//! Entradas del catálogo de servicios del taller (nombre + precio base).
//! Los contratos copian el precio al momento de contratar; cambios
//! posteriores al catálogo no alteran contratos históricos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Servicio del catálogo - mapea a la tabla services
#[derive(Debug, Clone, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub base_price: Decimal,
    pub created_at: DateTime<Utc>,
}
