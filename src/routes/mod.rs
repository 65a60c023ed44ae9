pub mod auth_routes;
pub mod contract_routes;
pub mod dashboard_routes;
pub mod payment_routes;
pub mod qr_routes;
pub mod quote_routes;
pub mod role_routes;
pub mod service_routes;
pub mod user_routes;
pub mod vehicle_routes;
