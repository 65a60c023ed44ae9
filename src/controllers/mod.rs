pub mod contract_controller;
pub mod payment_controller;
pub mod quote_controller;
pub mod role_controller;
pub mod service_controller;
pub mod user_controller;
pub mod vehicle_controller;
