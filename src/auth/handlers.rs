use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rusqlite::params;
use serde::Deserialize;
use serde_json::json;

use crate::auth::password;
use crate::db::models::Role;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Cheap structural check; the address is never verified by delivery.
fn valid_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// POST /users/register - create an account and issue a token.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Response> {
    if !valid_email(&req.email) {
        return Err(AppError::BadRequest("A valid email is required".into()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".into(),
        ));
    }

    let conn = state.db.get()?;

    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM users WHERE email = ?1",
        params![req.email],
        |row| row.get(0),
    )?;
    if exists {
        return Err(AppError::Conflict(
            "User with this email already exists".into(),
        ));
    }

    let hashed = password::hash_password(&req.password)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
    let role = req.role.unwrap_or(Role::User);
    let id = uuid::Uuid::now_v7().to_string();

    conn.execute(
        "INSERT INTO users (id, email, password_hash, role) VALUES (?1, ?2, ?3, ?4)",
        params![id, req.email, hashed, role.as_str()],
    )?;

    let token = state.jwt.issue(&id, &req.email, role)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "token": token,
            "user": { "id": id, "email": req.email, "role": role },
        })),
    )
        .into_response())
}

/// POST /users/login - verify credentials and issue a token.
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Response> {
    let conn = state.db.get()?;

    let row = conn.query_row(
        "SELECT id, password_hash, role FROM users WHERE email = ?1",
        params![req.email],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    );

    let (id, hashed, role) = match row {
        Ok(row) => row,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            return Err(AppError::Unauthorized("Invalid email or password".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let valid = password::verify_password(&req.password, &hashed)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    let role = Role::from_db(&role);
    let token = state.jwt.issue(&id, &req.email, role)?;

    Ok(Json(json!({
        "token": token,
        "user": { "id": id, "email": req.email, "role": role },
    }))
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(valid_email("alice@example.com"));
        assert!(valid_email("a.b+tag@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!valid_email(""));
        assert!(!valid_email("alice"));
        assert!(!valid_email("@example.com"));
        assert!(!valid_email("alice@nodot"));
        assert!(!valid_email("alice@.com"));
        assert!(!valid_email("alice@example."));
    }
}
