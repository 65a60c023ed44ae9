pub mod errors;
pub mod jwt;
pub mod permissions;
pub mod qr;
