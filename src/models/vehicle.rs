//! Modelo de Vehicle
//!
//! Vehículos registrados en el taller. Entidad independiente: varias
//! cotizaciones y contratos pueden referenciar el mismo vehículo.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehículo - mapea a la tabla vehicles
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub engine: String,
    pub transmission: String,
    pub license_plate: String,
    pub vin: Option<String>,
    pub engine_number: Option<String>,
    pub created_at: DateTime<Utc>,
}
