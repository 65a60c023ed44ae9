pub mod auth_dto;
pub mod common;
pub mod contract_dto;
pub mod dashboard_dto;
pub mod payment_dto;
pub mod quote_dto;
pub mod role_dto;
pub mod service_dto;
pub mod user_dto;
pub mod vehicle_dto;
