use serde::Serialize;

use crate::dto::contract_dto::ContractStatsResponse;
use crate::dto::quote_dto::QuoteStatsResponse;

/// Agregado que consume la pantalla principal del panel
#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    pub contracts: ContractStatsResponse,
    pub quotes: QuoteStatsResponse,
}
