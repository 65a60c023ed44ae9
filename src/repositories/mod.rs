pub mod contract_repository;
pub mod payment_repository;
pub mod quote_repository;
pub mod role_repository;
pub mod service_repository;
pub mod user_repository;
pub mod vehicle_repository;
