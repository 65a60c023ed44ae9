pub mod auth;
pub mod contract;
pub mod payment;
pub mod quote;
pub mod role;
pub mod service;
pub mod user;
pub mod vehicle;
