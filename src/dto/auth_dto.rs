use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::auth::AuthenticatedUser;

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Response de login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: Option<AuthenticatedUser>,
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn ok(user: AuthenticatedUser) -> Self {
        Self {
            success: true,
            user: Some(user),
            message: None,
        }
    }
}
