use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

/// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,

    #[validate(length(min = 1, max = 100))]
    pub engine: String,

    #[validate(length(min = 1, max = 50))]
    pub transmission: String,

    #[validate(length(min = 3, max = 20))]
    pub license_plate: String,

    pub vin: Option<String>,
    pub engine_number: Option<String>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2030))]
    pub year: Option<i32>,

    #[validate(length(min = 1, max = 100))]
    pub engine: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub transmission: Option<String>,

    #[validate(length(min = 3, max = 20))]
    pub license_plate: Option<String>,

    pub vin: Option<String>,
    pub engine_number: Option<String>,
}

/// Filtros para listado de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub license_plate: Option<String>,
    pub brand: Option<String>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
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

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            engine: vehicle.engine,
            transmission: vehicle.transmission,
            license_plate: vehicle.license_plate,
            vin: vehicle.vin,
            engine_number: vehicle.engine_number,
            created_at: vehicle.created_at,
        }
    }
}
