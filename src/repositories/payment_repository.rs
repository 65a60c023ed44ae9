use crate::dto::payment_dto::CreatePaymentRequest;
use crate::models::contract::{compute_status, ContractStatus};
use crate::models::payment::Payment;
use crate::utils::errors::AppError;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registrar un pago y, si referencia un contrato, recalcular su
    /// estatus en la misma transacción. El SELECT ... FOR UPDATE sobre la
    /// fila del contrato serializa pagos concurrentes del mismo contrato:
    /// el estatus escrito siempre refleja la suma real al commit.
    ///
    /// Pagos contra una cotización nunca tocan ningún contrato y
    /// devuelven estatus None.
    pub async fn create_with_status_cascade(
        &self,
        request: CreatePaymentRequest,
        responsible_user: Uuid,
    ) -> Result<(Payment, Option<ContractStatus>), AppError> {
        let mut tx = self.pool.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (id, contract_id, quote_id, amount, method, payment_date,
                                  voucher_reference, voucher_image, responsible_user, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.contract_id)
        .bind(request.quote_id)
        .bind(request.amount)
        .bind(request.method)
        .bind(request.payment_date)
        .bind(request.voucher_reference)
        .bind(request.voucher_image)
        .bind(responsible_user)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let new_status = match payment.contract_id {
            Some(contract_id) => Some(recompute_status(&mut tx, contract_id).await?),
            None => None,
        };

        tx.commit().await?;
        Ok((payment, new_status))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    pub async fn list_by_contract(&self, contract_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE contract_id = $1 ORDER BY payment_date, created_at",
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn list_by_quote(&self, quote_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE quote_id = $1 ORDER BY payment_date, created_at",
        )
        .bind(quote_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Suma decimal exacta de todos los pagos registrados contra un
    /// contrato
    pub async fn paid_amount(&self, contract_id: Uuid) -> Result<Decimal, AppError> {
        let result: (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE contract_id = $1",
        )
        .bind(contract_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Eliminar un pago. Si pertenecía a un contrato, el estatus se
    /// recalcula con los pagos restantes en la misma transacción.
    pub async fn delete_with_status_recompute(
        &self,
        id: Uuid,
    ) -> Result<Option<ContractStatus>, AppError> {
        let payment = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pago no encontrado".to_string()))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let new_status = match payment.contract_id {
            Some(contract_id) => Some(recompute_status(&mut tx, contract_id).await?),
            None => None,
        };

        tx.commit().await?;
        Ok(new_status)
    }
}

/// Recalcular y escribir el estatus del contrato dentro de la
/// transacción del llamador:
///   1. bloquear la fila del contrato (FOR UPDATE)
///   2. total = suma de partidas; pagado = suma de todos los pagos
///   3. aplicar la política de desempate (compute_status)
///   4. escribir el estatus
async fn recompute_status(
    tx: &mut Transaction<'_, Postgres>,
    contract_id: Uuid,
) -> Result<ContractStatus, AppError> {
    let locked: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM contracts WHERE id = $1 FOR UPDATE")
            .bind(contract_id)
            .fetch_optional(&mut **tx)
            .await?;

    if locked.is_none() {
        return Err(AppError::NotFound("Contrato no encontrado".to_string()));
    }

    let (total,): (Decimal,) = sqlx::query_as(
        "SELECT COALESCE(SUM(price), 0) FROM contract_services WHERE contract_id = $1",
    )
    .bind(contract_id)
    .fetch_one(&mut **tx)
    .await?;

    let (paid,): (Decimal,) = sqlx::query_as(
        "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE contract_id = $1",
    )
    .bind(contract_id)
    .fetch_one(&mut **tx)
    .await?;

    let status = compute_status(total, paid);

    sqlx::query("UPDATE contracts SET status = $2 WHERE id = $1")
        .bind(contract_id)
        .bind(status.as_str())
        .execute(&mut **tx)
        .await?;

    Ok(status)
}
