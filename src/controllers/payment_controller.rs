use crate::dto::common::ApiResponse;
use crate::dto::payment_dto::{CreatePaymentRequest, CreatePaymentResult, PaymentResponse};
use crate::models::auth::AuthSession;
use crate::repositories::contract_repository::ContractRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::utils::errors::AppError;
use crate::utils::permissions::{require_permission, PermissionName};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct PaymentController {
    repository: PaymentRepository,
    contracts: ContractRepository,
    quotes: QuoteRepository,
}

impl PaymentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PaymentRepository::new(pool.clone()),
            contracts: ContractRepository::new(pool.clone()),
            quotes: QuoteRepository::new(pool),
        }
    }

    /// Registrar un pago. Debe referenciar exactamente uno de
    /// {contrato, cotización}; si es contra un contrato, el estatus se
    /// recalcula en la misma transacción y se devuelve junto con el pago.
    pub async fn create(
        &self,
        session: &AuthSession,
        request: CreatePaymentRequest,
    ) -> Result<ApiResponse<CreatePaymentResult>, AppError> {
        require_permission(&session.permissions, PermissionName::CreatePayments)?;
        request.validate()?;

        if request.amount <= Decimal::ZERO {
            return Err(AppError::BadRequest(
                "El monto del pago debe ser mayor a cero".to_string(),
            ));
        }

        match resolve_target(request.contract_id, request.quote_id)? {
            PaymentTarget::Contract(contract_id) => {
                if self.contracts.find_by_id(contract_id).await?.is_none() {
                    return Err(AppError::NotFound("Contrato no encontrado".to_string()));
                }
            }
            PaymentTarget::Quote(quote_id) => {
                if self.quotes.find_by_id(quote_id).await?.is_none() {
                    return Err(AppError::NotFound("Cotización no encontrada".to_string()));
                }
            }
        }

        let (payment, new_status) = self
            .repository
            .create_with_status_cascade(request, session.user_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            CreatePaymentResult {
                payment: payment.into(),
                new_status,
            },
            "Pago registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_by_contract(
        &self,
        session: &AuthSession,
        contract_id: Uuid,
    ) -> Result<Vec<PaymentResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::ViewPayments)?;

        let payments = self.repository.list_by_contract(contract_id).await?;
        Ok(payments.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_quote(
        &self,
        session: &AuthSession,
        quote_id: Uuid,
    ) -> Result<Vec<PaymentResponse>, AppError> {
        require_permission(&session.permissions, PermissionName::ViewPayments)?;

        let payments = self.repository.list_by_quote(quote_id).await?;
        Ok(payments.into_iter().map(Into::into).collect())
    }

    pub async fn delete(&self, session: &AuthSession, id: Uuid) -> Result<(), AppError> {
        require_permission(&session.permissions, PermissionName::DeletePayments)?;
        self.repository.delete_with_status_recompute(id).await?;
        Ok(())
    }
}

/// Destino de un pago: exactamente uno de {contrato, cotización}. Solo
/// los pagos contra un contrato disparan la cascada de estatus.
#[derive(Debug, PartialEq, Eq)]
enum PaymentTarget {
    Contract(Uuid),
    Quote(Uuid),
}

fn resolve_target(
    contract_id: Option<Uuid>,
    quote_id: Option<Uuid>,
) -> Result<PaymentTarget, AppError> {
    match (contract_id, quote_id) {
        (Some(_), Some(_)) => Err(AppError::BadRequest(
            "El pago debe referenciar un contrato o una cotización, no ambos".to_string(),
        )),
        (None, None) => Err(AppError::BadRequest(
            "El pago debe referenciar un contrato o una cotización".to_string(),
        )),
        (Some(contract_id), None) => Ok(PaymentTarget::Contract(contract_id)),
        (None, Some(quote_id)) => Ok(PaymentTarget::Quote(quote_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_references_rejected() {
        let err = resolve_target(Some(Uuid::new_v4()), Some(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_no_reference_rejected() {
        let err = resolve_target(None, None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_quote_payment_never_targets_a_contract() {
        // Un pago contra cotización no lleva contrato: la cascada de
        // estatus no tiene sobre qué actuar
        let quote_id = Uuid::new_v4();
        let target = resolve_target(None, Some(quote_id)).unwrap();
        assert_eq!(target, PaymentTarget::Quote(quote_id));
    }

    #[test]
    fn test_contract_payment_targets_the_contract() {
        let contract_id = Uuid::new_v4();
        let target = resolve_target(Some(contract_id), None).unwrap();
        assert_eq!(target, PaymentTarget::Contract(contract_id));
    }
}
