use super::*;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub name: String,
    pub email: String,
}

/// Administrator-created account. Role defaults to standard.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Partial account edit. Blank or absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccountUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: Identity,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<Identity>,
}
