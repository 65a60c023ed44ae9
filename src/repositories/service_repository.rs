use crate::dto::service_dto::{CreateServiceRequest, UpdateServiceRequest};
use crate::models::service::Service;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateServiceRequest) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (id, name, base_price, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name)
        .bind(request.base_price)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(service)
    }

    pub async fn list(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(services)
    }

    pub async fn update(&self, id: Uuid, request: UpdateServiceRequest) -> Result<Service, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Servicio no encontrado".to_string()))?;

        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET name = $2, base_price = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.unwrap_or(current.name))
        .bind(request.base_price.unwrap_or(current.base_price))
        .fetch_one(&self.pool)
        .await?;

        Ok(service)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Servicio no encontrado".to_string()));
        }

        Ok(())
    }
}
