use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::contract::ContractStatus;
use crate::models::payment::Payment;

/// Request para registrar un pago. Debe referenciar exactamente uno de
/// {contract_id, quote_id}; la exclusividad se valida en el controller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub contract_id: Option<Uuid>,
    pub quote_id: Option<Uuid>,

    pub amount: Decimal,

    #[validate(length(min = 1, max = 50))]
    pub method: String,

    pub payment_date: NaiveDate,

    pub voucher_reference: Option<String>,
    pub voucher_image: Option<String>,
}

/// Response de pago
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub contract_id: Option<Uuid>,
    pub quote_id: Option<Uuid>,
    pub amount: Decimal,
    pub method: String,
    pub payment_date: NaiveDate,
    pub voucher_reference: Option<String>,
    pub voucher_image: Option<String>,
    pub responsible_user: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Resultado de registrar un pago: el pago persistido y el nuevo estatus
/// del contrato (None cuando el pago fue contra una cotización).
#[derive(Debug, Serialize)]
pub struct CreatePaymentResult {
    pub payment: PaymentResponse,
    pub new_status: Option<ContractStatus>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            contract_id: payment.contract_id,
            quote_id: payment.quote_id,
            amount: payment.amount,
            method: payment.method,
            payment_date: payment.payment_date,
            voucher_reference: payment.voucher_reference,
            voucher_image: payment.voucher_image,
            responsible_user: payment.responsible_user,
            created_at: payment.created_at,
        }
    }
}
