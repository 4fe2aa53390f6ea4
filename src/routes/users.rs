use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use rusqlite::{params, Connection};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::handlers as auth_handlers;
use crate::auth::password;
use crate::db::models::{LikedRef, Role, User};
use crate::error::{AppError, AppResult};
use crate::extractors::{AdminUser, AuthUser, MaybeAuthUser};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Public routes
        .route("/users/register", post(auth_handlers::register))
        .route("/users/login", post(auth_handlers::login))
        // Protected routes
        .route("/users", get(list_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        // Like routes
        .route("/users/{id}/like", post(like_submodel))
        .route("/users/{id}/unlike", post(unlike_submodel))
        .route("/users/{id}/liked", get(get_liked_submodels))
}

/// Load a user projection: everything except the password hash, with the
/// raw Like Set in insertion order.
fn fetch_user(conn: &Connection, user_id: &str) -> AppResult<Option<User>> {
    let row = conn.query_row(
        "SELECT id, email, role, created_at, updated_at FROM users WHERE id = ?1",
        params![user_id],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        },
    );

    let (id, email, role, created_at, updated_at) = match row {
        Ok(row) => row,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut stmt = conn.prepare(
        "SELECT model_id, submodel_id FROM liked_submodels WHERE user_id = ?1 ORDER BY rowid",
    )?;
    let liked_submodels = stmt
        .query_map(params![id], |row| {
            Ok(LikedRef {
                model_id: row.get(0)?,
                submodel_id: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(User {
        id,
        email,
        role: Role::from_db(&role),
        liked_submodels,
        created_at,
        updated_at,
    }))
}

/// GET /users - admin only.
async fn list_users(
    State(state): State<AppState>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<Vec<User>>> {
    let conn = state.db.get()?;

    let ids: Vec<String> = {
        let mut stmt = conn.prepare("SELECT id FROM users ORDER BY rowid")?;
        stmt.query_map([], |row| row.get(0))?
            .collect::<Result<_, _>>()?
    };

    let mut users = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(user) = fetch_user(&conn, &id)? {
            users.push(user);
        }
    }

    Ok(Json(users))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthUser(_claims): AuthUser,
) -> AppResult<Json<User>> {
    let conn = state.db.get()?;
    let user = fetch_user(&conn, &id)?
        .ok_or_else(|| AppError::NotFound(format!("User not found with id: {}", id)))?;
    Ok(Json(user))
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// PUT /users/{id} - callers may update themselves; admins anyone.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdateUserRequest>,
) -> AppResult<Json<Value>> {
    if !claims.may_act_for(&id) {
        return Err(AppError::Forbidden(
            "Access denied. You can only access your own resources.".into(),
        ));
    }

    if let Some(ref password) = req.password {
        if password.len() < 8 {
            return Err(AppError::BadRequest(
                "Password must be at least 8 characters".into(),
            ));
        }
    }

    let conn = state.db.get()?;

    let row = conn.query_row(
        "SELECT email, password_hash, role FROM users WHERE id = ?1",
        params![id],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    );
    let (email, password_hash, role) = match row {
        Ok(row) => row,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            return Err(AppError::NotFound(format!("User not found with id: {}", id)));
        }
        Err(e) => return Err(e.into()),
    };

    let new_email = match req.email {
        Some(new_email) if new_email != email => {
            let taken: bool = conn.query_row(
                "SELECT COUNT(*) > 0 FROM users WHERE email = ?1",
                params![new_email],
                |row| row.get(0),
            )?;
            if taken {
                return Err(AppError::Conflict(
                    "User with this email already exists".into(),
                ));
            }
            new_email
        }
        Some(same) => same,
        None => email,
    };

    let new_hash = match req.password {
        Some(password) => password::hash_password(&password)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?,
        None => password_hash,
    };

    let new_role = req.role.map(|r| r.as_str().to_string()).unwrap_or(role);

    conn.execute(
        "UPDATE users SET email = ?1, password_hash = ?2, role = ?3, updated_at = datetime('now')
         WHERE id = ?4",
        params![new_email, new_hash, new_role, id],
    )?;

    Ok(Json(json!({ "message": "User updated successfully" })))
}

/// DELETE /users/{id} - admin only. Like Set entries go with the user.
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<Value>> {
    let conn = state.db.get()?;
    let rows = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;

    if rows > 0 {
        Ok(Json(json!({ "message": "User deleted successfully" })))
    } else {
        Err(AppError::NotFound(format!("User not found with id: {}", id)))
    }
}

// -- Like routes --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub submodel_id: Option<String>,
}

fn require_ids(req: &LikeRequest) -> AppResult<(&str, &str)> {
    match (req.model_id.as_deref(), req.submodel_id.as_deref()) {
        (Some(model_id), Some(submodel_id)) if !model_id.is_empty() && !submodel_id.is_empty() => {
            Ok((model_id, submodel_id))
        }
        _ => Err(AppError::BadRequest(
            "Model ID and Submodel ID are required".into(),
        )),
    }
}

/// POST /users/{id}/like
async fn like_submodel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthUser(claims): AuthUser,
    Json(req): Json<LikeRequest>,
) -> AppResult<Json<Value>> {
    let (model_id, submodel_id) = require_ids(&req)?;

    let outcome = state.likes.like(&claims, &id, model_id, submodel_id).await?;
    Ok(Json(json!({ "message": outcome.message() })))
}

/// POST /users/{id}/unlike
async fn unlike_submodel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthUser(claims): AuthUser,
    Json(req): Json<LikeRequest>,
) -> AppResult<Json<Value>> {
    let (model_id, submodel_id) = require_ids(&req)?;

    let outcome = state
        .likes
        .unlike(&claims, &id, model_id, submodel_id)
        .await?;
    Ok(Json(json!({ "message": outcome.message() })))
}

/// GET /users/{id}/liked - detailed liked records, joined at read time.
/// Anonymous callers get an empty list rather than a 401; this is a
/// deliberate contract, not an oversight.
async fn get_liked_submodels(
    State(state): State<AppState>,
    Path(id): Path<String>,
    MaybeAuthUser(claims): MaybeAuthUser,
) -> AppResult<Json<Value>> {
    if claims.is_none() {
        return Ok(Json(json!({ "likedSubmodels": [] })));
    }

    let details = state.likes.detailed_liked(&id).await?;
    Ok(Json(json!({ "likedSubmodels": details })))
}
