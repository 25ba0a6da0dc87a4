use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::user::{CreateUserInput, UpdateUserInput, User, UserSettings, UserSettingsPatch};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub settings: Option<UserSettingsPatch>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    pub settings: Option<UserSettingsPatch>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    pub roles: Option<Vec<String>>,
}

/// User as returned to HTTP callers. The credential hash never leaves the
/// service boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub last_login: String,
    pub settings: UserSettings,
    pub roles: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            last_login: user.last_login,
            settings: user.settings,
            roles: user.roles,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<RegisterRequest> for CreateUserInput {
    fn from(request: RegisterRequest) -> Self {
        CreateUserInput {
            email: request.email,
            password: request.password,
            settings: request.settings,
        }
    }
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(request: UpdateUserRequest) -> Self {
        UpdateUserInput {
            email: request.email,
            password: request.password,
            settings: request.settings,
            is_active: request.is_active,
            roles: request.roles,
        }
    }
}
