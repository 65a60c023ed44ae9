//! Modelos de Contract y lógica de estatus
//!
//! El contrato es el registro transaccional central: cliente, vehículo,
//! cotización de origen (opcional), partidas de servicio con precio
//! congelado y un token QR único. Su campo `status` es un valor derivado:
//! se recalcula a partir de la suma de pagos contra el total de partidas
//! cada vez que se registra un pago (cascada de estatus).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estatus del contrato. Tres valores literales del sistema original:
/// "expired" también cubre "sin pagos todavía" (rareza de nomenclatura
/// heredada; no hay lógica de vencimiento por fecha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    CurrentAndPaid,
    CurrentAndInDebt,
    Expired,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::CurrentAndPaid => "current_and_paid",
            ContractStatus::CurrentAndInDebt => "current_and_in_debt",
            ContractStatus::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "current_and_paid" => Some(ContractStatus::CurrentAndPaid),
            "current_and_in_debt" => Some(ContractStatus::CurrentAndInDebt),
            "expired" => Some(ContractStatus::Expired),
            _ => None,
        }
    }

    pub fn all() -> &'static [ContractStatus] {
        &[
            ContractStatus::CurrentAndPaid,
            ContractStatus::CurrentAndInDebt,
            ContractStatus::Expired,
        ]
    }
}

/// Recalcular el estatus a partir del total contratado y lo pagado.
/// Orden de prioridad exacto:
///   pagado >= total      → CurrentAndPaid
///   0 < pagado < total   → CurrentAndInDebt
///   pagado == 0          → Expired
/// Aritmética decimal exacta; nunca punto flotante.
pub fn compute_status(total: Decimal, paid: Decimal) -> ContractStatus {
    if paid >= total {
        ContractStatus::CurrentAndPaid
    } else if paid > Decimal::ZERO {
        ContractStatus::CurrentAndInDebt
    } else {
        ContractStatus::Expired
    }
}

/// Contrato - mapea a la tabla contracts
#[derive(Debug, Clone, FromRow)]
pub struct Contract {
    pub id: Uuid,
    pub contract_number: i64,
    pub client_name: String,
    pub client_address: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub privacy_consent: bool,
    pub vehicle_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    pub responsible_user: Uuid,
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
}

/// Partida de servicio - mapea a contract_services.
/// El precio es una copia del catálogo al momento de contratar.
#[derive(Debug, Clone, FromRow)]
pub struct ContractService {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub service_id: Uuid,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decimal desde centavos
    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_paid_in_full_is_current_and_paid() {
        assert_eq!(
            compute_status(dec(80000), dec(80000)),
            ContractStatus::CurrentAndPaid
        );
    }

    #[test]
    fn test_overpayment_is_current_and_paid() {
        assert_eq!(
            compute_status(dec(80000), dec(90000)),
            ContractStatus::CurrentAndPaid
        );
    }

    #[test]
    fn test_partial_payment_is_in_debt() {
        assert_eq!(
            compute_status(dec(80000), dec(30000)),
            ContractStatus::CurrentAndInDebt
        );
        // Un centavo por debajo del total sigue en deuda
        assert_eq!(
            compute_status(dec(80000), dec(79999)),
            ContractStatus::CurrentAndInDebt
        );
    }

    #[test]
    fn test_zero_payments_is_expired() {
        assert_eq!(
            compute_status(dec(80000), Decimal::ZERO),
            ContractStatus::Expired
        );
    }

    #[test]
    fn test_zero_total_with_zero_paid_is_paid() {
        // total 0 y pagado 0: pagado >= total gana por orden de prioridad
        assert_eq!(
            compute_status(Decimal::ZERO, Decimal::ZERO),
            ContractStatus::CurrentAndPaid
        );
    }

    #[test]
    fn test_payment_lifecycle_scenario() {
        // Contrato con partidas de 500 y 300 (T = 800)
        let total = dec(50000) + dec(30000);

        // Pago de 300 → en deuda
        let mut paid = dec(30000);
        assert_eq!(compute_status(total, paid), ContractStatus::CurrentAndInDebt);

        // Pago acumulado 800 = T → pagado
        paid += dec(50000);
        assert_eq!(compute_status(total, paid), ContractStatus::CurrentAndPaid);
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in ContractStatus::all() {
            assert_eq!(ContractStatus::from_str(status.as_str()), Some(*status));
        }
        assert_eq!(ContractStatus::from_str("vigente"), None);
    }
}
