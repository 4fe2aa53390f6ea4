use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::catalog::{self, ModelUpdate, NewModel, NewSubmodel};
use crate::db::models::{CarModel, Submodel};
use crate::error::{AppError, AppResult};
use crate::extractors::AdminUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Reads are public; writes require the admin role
        .route("/models", get(list_models).post(create_model))
        .route("/models/name/{name}", get(get_model_by_name))
        .route(
            "/models/{id}",
            get(get_model).put(update_model).delete(delete_model),
        )
        .route(
            "/models/{id}/submodels",
            get(list_submodels).post(add_submodel),
        )
        .route(
            "/models/{id}/submodels/{submodel_id}",
            get(get_submodel).put(update_submodel).delete(delete_submodel),
        )
}

// -- Model handlers --

async fn list_models(State(state): State<AppState>) -> AppResult<Json<Vec<CarModel>>> {
    Ok(Json(catalog::list_models(&state.db)?))
}

async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CarModel>> {
    let model = catalog::get_model(&state.db, &id)?
        .ok_or_else(|| AppError::NotFound(format!("Car model not found with id: {}", id)))?;
    Ok(Json(model))
}

async fn get_model_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<CarModel>> {
    let model = catalog::get_model_by_name(&state.db, &name)?
        .ok_or_else(|| AppError::NotFound(format!("Car model not found with name: {}", name)))?;
    Ok(Json(model))
}

async fn create_model(
    State(state): State<AppState>,
    AdminUser(_claims): AdminUser,
    Json(new): Json<NewModel>,
) -> AppResult<Response> {
    let model = catalog::create_model(&state.db, &new)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, model.id.clone())],
        Json(json!({
            "message": format!("Created a new car model with id: {}", model.id),
            "model": model,
        })),
    )
        .into_response())
}

async fn update_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AdminUser(_claims): AdminUser,
    Json(update): Json<ModelUpdate>,
) -> AppResult<Response> {
    if catalog::update_model(&state.db, &id, update)? {
        Ok(Json(json!({
            "message": format!("Successfully updated car model with id: {}", id),
        }))
        .into_response())
    } else {
        Err(AppError::NotFound(format!(
            "Car model not found with id: {}",
            id
        )))
    }
}

async fn delete_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Response> {
    if catalog::delete_model(&state.db, &id)? {
        Ok((
            StatusCode::ACCEPTED,
            Json(json!({
                "message": format!("Successfully removed car model with id {}", id),
            })),
        )
            .into_response())
    } else {
        Err(AppError::NotFound(format!(
            "Car model not found with id: {}",
            id
        )))
    }
}

// -- Submodel handlers --

async fn list_submodels(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Submodel>>> {
    let submodels = catalog::list_submodels(&state.db, &id)?
        .ok_or_else(|| AppError::NotFound(format!("Car model not found with id: {}", id)))?;
    Ok(Json(submodels))
}

async fn get_submodel(
    State(state): State<AppState>,
    Path((id, submodel_id)): Path<(String, String)>,
) -> AppResult<Json<Submodel>> {
    if !catalog::model_is_present(&state.db, &id)? {
        return Err(AppError::NotFound(format!("Model not found with id: {}", id)));
    }

    let submodel = catalog::get_submodel(&state.db, &id, &submodel_id)?.ok_or_else(|| {
        AppError::NotFound(format!("Submodel not found with id: {}", submodel_id))
    })?;
    Ok(Json(submodel))
}

async fn add_submodel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AdminUser(_claims): AdminUser,
    Json(new): Json<NewSubmodel>,
) -> AppResult<Response> {
    let Some(submodel) = catalog::add_submodel(&state.db, &id, &new)? else {
        return Err(AppError::NotFound("Model not found".into()));
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Submodel added successfully",
            "submodel": submodel,
        })),
    )
        .into_response())
}

async fn update_submodel(
    State(state): State<AppState>,
    Path((id, submodel_id)): Path<(String, String)>,
    AdminUser(_claims): AdminUser,
    Json(new): Json<NewSubmodel>,
) -> AppResult<Json<serde_json::Value>> {
    if catalog::update_submodel(&state.db, &id, &submodel_id, &new)? {
        Ok(Json(json!({ "message": "Submodel updated successfully" })))
    } else {
        Err(AppError::NotFound("Model or submodel not found".into()))
    }
}

async fn delete_submodel(
    State(state): State<AppState>,
    Path((id, submodel_id)): Path<(String, String)>,
    AdminUser(_claims): AdminUser,
) -> AppResult<Json<serde_json::Value>> {
    if catalog::delete_submodel(&state.db, &id, &submodel_id)? {
        Ok(Json(json!({ "message": "Submodel deleted successfully" })))
    } else {
        Err(AppError::NotFound("Model or submodel not found".into()))
    }
}
