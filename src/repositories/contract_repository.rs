use crate::dto::contract_dto::{ContractFilters, CreateContractRequest, UpdateContractRequest};
use crate::models::contract::{Contract, ContractStatus};
use crate::utils::errors::AppError;
use crate::utils::qr;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Partida con el nombre del servicio de catálogo ya resuelto
#[derive(Debug, sqlx::FromRow)]
pub struct ContractServiceWithName {
    pub id: Uuid,
    pub service_id: Uuid,
    pub service_name: String,
    pub price: Decimal,
}

/// Conteo por estatus
#[derive(Debug, sqlx::FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Interpretar el término de búsqueda como número de contrato.
/// Acepta un entero a secas o con el prefijo "CNT-" (ej. "CNT-7" → 7);
/// cualquier otra cosa no activa la rama de búsqueda por número.
pub fn parse_contract_number(term: &str) -> Option<i64> {
    let term = term.trim();
    let digits = term
        .strip_prefix("CNT-")
        .or_else(|| term.strip_prefix("cnt-"))
        .unwrap_or(term);
    digits.parse::<i64>().ok()
}

pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear el contrato con sus partidas en una sola transacción.
    /// Cada partida congela el precio vigente del catálogo; el estatus
    /// inicial es "expired" (cero pagos) y el token QR se genera aquí.
    pub async fn create(
        &self,
        request: CreateContractRequest,
        responsible_user: Uuid,
    ) -> Result<Contract, AppError> {
        let mut tx = self.pool.begin().await?;

        let qr_code = qr::generate_qr_token(qr::CONTRACT_PREFIX);

        let contract = sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts (id, client_name, client_address, client_phone, client_email,
                                   privacy_consent, vehicle_id, quote_id, start_date, end_date,
                                   status, responsible_user, qr_code, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.client_name)
        .bind(request.client_address)
        .bind(request.client_phone)
        .bind(request.client_email)
        .bind(request.privacy_consent)
        .bind(request.vehicle_id)
        .bind(request.quote_id)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(ContractStatus::Expired.as_str())
        .bind(responsible_user)
        .bind(&qr_code)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let service_ids: Vec<Uuid> = request.services.iter().map(|s| s.service_id).collect();
        insert_line_items(&mut tx, contract.id, &service_ids).await?;

        tx.commit().await?;
        Ok(contract)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contract)
    }

    /// Búsqueda por token QR: igualdad exacta sobre la columna indexada
    pub async fn find_by_qr_code(&self, token: &str) -> Result<Option<Contract>, AppError> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE qr_code = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contract)
    }

    /// Listado con filtro por estatus y búsqueda libre. El término se
    /// compara con ILIKE contra nombre de cliente y placa; si además
    /// parsea como número ("7" o "CNT-7") se agrega la rama OR de
    /// igualdad exacta sobre contract_number.
    pub async fn list(&self, filters: &ContractFilters) -> Result<Vec<Contract>, AppError> {
        let search = filters.search.as_deref().filter(|s| !s.trim().is_empty());
        let number = search.and_then(parse_contract_number);

        let contracts = sqlx::query_as::<_, Contract>(
            r#"
            SELECT c.* FROM contracts c
            INNER JOIN vehicles v ON v.id = c.vehicle_id
            WHERE ($1::text IS NULL OR c.status = $1)
              AND ($2::text IS NULL
                   OR c.client_name ILIKE '%' || $2 || '%'
                   OR v.license_plate ILIKE '%' || $2 || '%'
                   OR ($3::bigint IS NOT NULL AND c.contract_number = $3))
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(filters.status.as_deref())
        .bind(search)
        .bind(number)
        .fetch_all(&self.pool)
        .await?;

        Ok(contracts)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateContractRequest,
    ) -> Result<Contract, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contrato no encontrado".to_string()))?;

        let mut tx = self.pool.begin().await?;

        // El estatus solo cambia por la cascada de pagos o por el
        // override administrativo explícito
        let status = match &request.status_override {
            Some(s) => ContractStatus::from_str(s)
                .ok_or_else(|| AppError::BadRequest(format!("Estatus inválido: {}", s)))?
                .as_str()
                .to_string(),
            None => current.status,
        };

        let contract = sqlx::query_as::<_, Contract>(
            r#"
            UPDATE contracts
            SET client_name = $2, client_address = $3, client_phone = $4, client_email = $5,
                privacy_consent = $6, end_date = $7, status = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.client_name.unwrap_or(current.client_name))
        .bind(request.client_address.unwrap_or(current.client_address))
        .bind(request.client_phone.or(current.client_phone))
        .bind(request.client_email.or(current.client_email))
        .bind(request.privacy_consent.unwrap_or(current.privacy_consent))
        .bind(request.end_date.or(current.end_date))
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        // Reemplazo total de partidas cuando el caller manda servicios
        if let Some(services) = &request.services {
            let service_ids: Vec<Uuid> = services.iter().map(|s| s.service_id).collect();
            replace_line_items(&mut tx, id, &service_ids).await?;
        }

        tx.commit().await?;
        Ok(contract)
    }

    /// Eliminar el contrato en orden seguro de FK: partidas, pagos,
    /// contrato.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM contract_services WHERE contract_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM payments WHERE contract_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Contrato no encontrado".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn line_items_with_names(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<ContractServiceWithName>, AppError> {
        let items = sqlx::query_as::<_, ContractServiceWithName>(
            r#"
            SELECT cs.id, cs.service_id, s.name AS service_name, cs.price
            FROM contract_services cs
            INNER JOIN services s ON s.id = cs.service_id
            WHERE cs.contract_id = $1
            ORDER BY s.name
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Suma decimal exacta de las partidas del contrato
    pub async fn total_amount(&self, contract_id: Uuid) -> Result<Decimal, AppError> {
        let result: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(price), 0) FROM contract_services WHERE contract_id = $1",
        )
        .bind(contract_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Conteo de contratos por valor de estatus
    pub async fn stats(&self) -> Result<Vec<StatusCount>, AppError> {
        let counts = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM contracts GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}

/// Insertar partidas congelando el precio base vigente del catálogo
async fn insert_line_items(
    tx: &mut Transaction<'_, Postgres>,
    contract_id: Uuid,
    service_ids: &[Uuid],
) -> Result<(), AppError> {
    for service_id in service_ids {
        let price: Option<(Decimal,)> =
            sqlx::query_as("SELECT base_price FROM services WHERE id = $1")
                .bind(service_id)
                .fetch_optional(&mut **tx)
                .await?;

        let (price,) = price.ok_or_else(|| {
            AppError::BadRequest(format!("Servicio '{}' no existe en el catálogo", service_id))
        })?;

        sqlx::query(
            r#"
            INSERT INTO contract_services (id, contract_id, service_id, price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(contract_id)
        .bind(service_id)
        .bind(price)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Reemplazo total de partidas: delete-all seguido de insert-new, con
/// precios re-congelados del catálogo vigente.
async fn replace_line_items(
    tx: &mut Transaction<'_, Postgres>,
    contract_id: Uuid,
    service_ids: &[Uuid],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM contract_services WHERE contract_id = $1")
        .bind(contract_id)
        .execute(&mut **tx)
        .await?;

    insert_line_items(tx, contract_id, service_ids).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_number() {
        assert_eq!(parse_contract_number("7"), Some(7));
        assert_eq!(parse_contract_number("  42 "), Some(42));
    }

    #[test]
    fn test_parse_with_prefix() {
        assert_eq!(parse_contract_number("CNT-7"), Some(7));
        assert_eq!(parse_contract_number("cnt-123"), Some(123));
    }

    #[test]
    fn test_parse_rejects_free_text() {
        assert_eq!(parse_contract_number("Juan Pérez"), None);
        assert_eq!(parse_contract_number("CNT-"), None);
        assert_eq!(parse_contract_number("CNT-V1StGXR8_Z5j"), None);
        assert_eq!(parse_contract_number(""), None);
    }
}
