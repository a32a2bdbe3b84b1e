use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserIdResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct PasswordChangedResponse {
    pub id: String,
    pub old_password: String,
    pub new_password: String,
}
