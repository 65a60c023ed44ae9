use crate::dto::quote_dto::{CreateQuoteRequest, UpdateQuoteRequest};
use crate::models::quote::{Quote, VehicleCheck, VehicleServiceRequest};
use crate::utils::errors::AppError;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Agregados de cotizaciones calculados directamente en SQL
#[derive(Debug, sqlx::FromRow)]
pub struct QuoteStats {
    pub total: i64,
    pub purchase_checks: i64,
    pub repair_estimate_total: Decimal,
}

pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear la cotización junto con su checklist y trabajos solicitados
    /// en una sola transacción.
    pub async fn create(
        &self,
        request: CreateQuoteRequest,
        responsible_user: Uuid,
    ) -> Result<Quote, AppError> {
        let mut tx = self.pool.begin().await?;

        let quote = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (id, vehicle_id, client_name, notes, repair_estimate,
                                purchase_check, full_inspection, quote_date, responsible_user, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.vehicle_id)
        .bind(request.client_name)
        .bind(request.notes)
        .bind(request.repair_estimate)
        .bind(request.purchase_check)
        .bind(request.full_inspection)
        .bind(request.quote_date)
        .bind(responsible_user)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        insert_check(&mut tx, quote.id, &request.check).await?;
        insert_requested_services(&mut tx, quote.id, &request.requested_services).await?;

        tx.commit().await?;
        Ok(quote)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(quote)
    }

    pub async fn find_check(&self, quote_id: Uuid) -> Result<Option<VehicleCheck>, AppError> {
        let check =
            sqlx::query_as::<_, VehicleCheck>("SELECT * FROM vehicle_checks WHERE quote_id = $1")
                .bind(quote_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(check)
    }

    pub async fn find_requested_services(
        &self,
        quote_id: Uuid,
    ) -> Result<Option<VehicleServiceRequest>, AppError> {
        let services = sqlx::query_as::<_, VehicleServiceRequest>(
            "SELECT * FROM vehicle_service_requests WHERE quote_id = $1",
        )
        .bind(quote_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn list(&self) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>("SELECT * FROM quotes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(quotes)
    }

    /// Actualizar campos escalares; cuando vienen checklist o trabajos
    /// solicitados, las filas hijas previas se eliminan y recrean
    /// (reemplazo destructivo, semántica documentada del sistema).
    pub async fn update(&self, id: Uuid, request: UpdateQuoteRequest) -> Result<Quote, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cotización no encontrada".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let quote = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes
            SET client_name = $2, notes = $3, repair_estimate = $4,
                purchase_check = $5, full_inspection = $6, quote_date = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.client_name.unwrap_or(current.client_name))
        .bind(request.notes.or(current.notes))
        .bind(request.repair_estimate.unwrap_or(current.repair_estimate))
        .bind(request.purchase_check.unwrap_or(current.purchase_check))
        .bind(request.full_inspection.unwrap_or(current.full_inspection))
        .bind(request.quote_date.unwrap_or(current.quote_date))
        .fetch_one(&mut *tx)
        .await?;

        if let Some(check) = &request.check {
            replace_check(&mut tx, id, check).await?;
        }

        if let Some(services) = &request.requested_services {
            replace_requested_services(&mut tx, id, services).await?;
        }

        tx.commit().await?;
        Ok(quote)
    }

    /// Eliminar la cotización: primero las filas hijas (orden seguro de
    /// FK), luego la cotización; los contratos dependientes quedan con
    /// quote_id nulo.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM vehicle_checks WHERE quote_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM vehicle_service_requests WHERE quote_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE contracts SET quote_id = NULL WHERE quote_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cotización no encontrada".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Agregados para el dashboard; la suma de estimados se calcula con
    /// un agregado SQL directo para precisión decimal.
    pub async fn stats(&self) -> Result<QuoteStats, AppError> {
        let stats = sqlx::query_as::<_, QuoteStats>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE purchase_check) AS purchase_checks,
                   COALESCE(SUM(repair_estimate), 0) AS repair_estimate_total
            FROM quotes
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}

/// Reemplazo destructivo del checklist: delete-then-insert dentro de la
/// transacción del update. Repetir el mismo payload deja exactamente una
/// fila por cotización.
async fn replace_check(
    tx: &mut Transaction<'_, Postgres>,
    quote_id: Uuid,
    check: &VehicleCheck,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM vehicle_checks WHERE quote_id = $1")
        .bind(quote_id)
        .execute(&mut **tx)
        .await?;

    insert_check(tx, quote_id, check).await
}

/// Reemplazo destructivo de los trabajos solicitados
async fn replace_requested_services(
    tx: &mut Transaction<'_, Postgres>,
    quote_id: Uuid,
    services: &VehicleServiceRequest,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM vehicle_service_requests WHERE quote_id = $1")
        .bind(quote_id)
        .execute(&mut **tx)
        .await?;

    insert_requested_services(tx, quote_id, services).await
}

async fn insert_check(
    tx: &mut Transaction<'_, Postgres>,
    quote_id: Uuid,
    check: &VehicleCheck,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO vehicle_checks (
            quote_id,
            engine_oil, coolant, brake_fluid, power_steering_fluid, transmission_fluid, windshield_washer_fluid,
            battery_condition, battery_terminals, alternator,
            front_tires, rear_tires, spare_tire, front_brakes, rear_brakes, parking_brake,
            engine_condition, transmission_condition, clutch, suspension, shock_absorbers, steering,
            exhaust_system, belts, hoses, radiator, air_filter, fuel_system, ignition_system,
            headlights, tail_lights, turn_signals, horn, wipers, interior_lights, dashboard_indicators, air_conditioning
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
                $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32, $33, $34, $35, $36, $37)
        "#,
    )
    .bind(quote_id)
    .bind(&check.engine_oil)
    .bind(&check.coolant)
    .bind(&check.brake_fluid)
    .bind(&check.power_steering_fluid)
    .bind(&check.transmission_fluid)
    .bind(&check.windshield_washer_fluid)
    .bind(&check.battery_condition)
    .bind(&check.battery_terminals)
    .bind(&check.alternator)
    .bind(&check.front_tires)
    .bind(&check.rear_tires)
    .bind(&check.spare_tire)
    .bind(&check.front_brakes)
    .bind(&check.rear_brakes)
    .bind(&check.parking_brake)
    .bind(&check.engine_condition)
    .bind(&check.transmission_condition)
    .bind(&check.clutch)
    .bind(&check.suspension)
    .bind(&check.shock_absorbers)
    .bind(&check.steering)
    .bind(&check.exhaust_system)
    .bind(&check.belts)
    .bind(&check.hoses)
    .bind(&check.radiator)
    .bind(&check.air_filter)
    .bind(&check.fuel_system)
    .bind(&check.ignition_system)
    .bind(&check.headlights)
    .bind(&check.tail_lights)
    .bind(&check.turn_signals)
    .bind(&check.horn)
    .bind(&check.wipers)
    .bind(&check.interior_lights)
    .bind(&check.dashboard_indicators)
    .bind(&check.air_conditioning)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn insert_requested_services(
    tx: &mut Transaction<'_, Postgres>,
    quote_id: Uuid,
    services: &VehicleServiceRequest,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO vehicle_service_requests (
            quote_id,
            engine_repair, transmission_repair, brake_service, suspension_service,
            electrical_repair, air_conditioning_service, bodywork, painting,
            oil_change, tire_change, alignment_balancing, diagnostics,
            general_maintenance, washing_detailing
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(quote_id)
    .bind(services.engine_repair)
    .bind(services.transmission_repair)
    .bind(services.brake_service)
    .bind(services.suspension_service)
    .bind(services.electrical_repair)
    .bind(services.air_conditioning_service)
    .bind(services.bodywork)
    .bind(services.painting)
    .bind(services.oil_change)
    .bind(services.tire_change)
    .bind(services.alignment_balancing)
    .bind(services.diagnostics)
    .bind(services.general_maintenance)
    .bind(services.washing_detailing)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
