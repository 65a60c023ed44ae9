use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, brand, model, year, engine, transmission, license_plate, vin, engine_number, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.brand)
        .bind(request.model)
        .bind(request.year)
        .bind(request.engine)
        .bind(request.transmission)
        .bind(request.license_plate)
        .bind(request.vin)
        .bind(request.engine_number)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::text IS NULL OR license_plate ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR brand ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            "#,
        )
        .bind(filters.license_plate.as_deref())
        .bind(filters.brand.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<Vehicle, AppError> {
        // Obtener vehículo actual para aplicar cambios parciales
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, year = $4, engine = $5, transmission = $6,
                license_plate = $7, vin = $8, engine_number = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.brand.unwrap_or(current.brand))
        .bind(request.model.unwrap_or(current.model))
        .bind(request.year.unwrap_or(current.year))
        .bind(request.engine.unwrap_or(current.engine))
        .bind(request.transmission.unwrap_or(current.transmission))
        .bind(request.license_plate.unwrap_or(current.license_plate))
        .bind(request.vin.or(current.vin))
        .bind(request.engine_number.or(current.engine_number))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        Ok(())
    }
}
