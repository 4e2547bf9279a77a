//! Operator registration and login.

use axum::{extract::State, http::StatusCode, Json};
use persistence::repositories::UserRepository;
use serde::Deserialize;
use shared::password::{hash_password, verify_password};
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::user::{User, UserResponse};

/// Request body for registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.db.pool().clone());
    if repo.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = hash_password(&request.password)?;
    let user: User = repo
        .create(&request.name, &request.email, &password_hash)
        .await
        .map_err(|e| match ApiError::from(e) {
            // Lost a race with a concurrent registration.
            ApiError::Conflict(_) => ApiError::BadRequest("Email already registered".to_string()),
            other => other,
        })?
        .into();

    info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.db.pool().clone());
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user: User = repo
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?
        .into();

    if !verify_password(&request.password, &user.password_hash)? {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid());
    }

    info!(user_id = user.id, "User logged in");

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            name: "Ayşe Demir".to_string(),
            email: "ayse@example.org".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_login_request_requires_password() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email": "ayse@example.org", "password": ""}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
