use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::service::Service;

/// Request para crear una entrada del catálogo de servicios
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: String,

    pub base_price: Decimal,
}

/// Request para actualizar una entrada del catálogo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: Option<String>,

    pub base_price: Option<Decimal>,
}

/// Response de servicio del catálogo
#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub name: String,
    pub base_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            name: service.name,
            base_price: service.base_price,
            created_at: service.created_at,
        }
    }
}
