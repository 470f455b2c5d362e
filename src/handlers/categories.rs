// src/handlers/categories.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, extract::ApiJson},
    config::AppState,
    models::inventory::{Category, CategoryWithCount, Status},
};

// ---
// Payload: criação e atualização usam o mesmo conjunto de campos
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(length(min = 1, max = 255, message = "O nome é obrigatório e deve ter no máximo 255 caracteres."))]
    pub name: String,
    pub description: Option<String>,
    pub status: Status,
}

// GET /api/v1/categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "Todas as categorias com contagem de produtos", body = Vec<CategoryWithCount>)
    )
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.category_service.list().await?;
    Ok((StatusCode::OK, Json(categories)))
}

// POST /api/v1/categories
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 422, description = "Validação falhou ou nome duplicado")
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .category_service
        .create(&payload.name, payload.description.as_deref(), payload.status)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// GET /api/v1/categories/{id}
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria com contagem de produtos", body = CategoryWithCount),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let category = app_state.category_service.get(id).await?;
    Ok((StatusCode::OK, Json(category)))
}

// PUT/PATCH /api/v1/categories/{id}
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = Category),
        (status = 404, description = "Categoria não encontrada"),
        (status = 422, description = "Validação falhou ou nome duplicado")
    )
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .category_service
        .update(id, &payload.name, payload.description.as_deref(), payload.status)
        .await?;

    Ok((StatusCode::OK, Json(category)))
}

// DELETE /api/v1/categories/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria excluída"),
        (status = 404, description = "Categoria não encontrada"),
        (status = 422, description = "Categoria ainda possui produtos")
    )
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.category_service.delete(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Categoria excluída com sucesso." })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_fails_validation() {
        let payload = CategoryPayload {
            name: String::new(),
            description: None,
            status: Status::Active,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn overlong_name_fails_validation() {
        let payload = CategoryPayload {
            name: "x".repeat(256),
            description: None,
            status: Status::Active,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn valid_payload_passes() {
        let payload = CategoryPayload {
            name: "Electronics".into(),
            description: Some("Electronic devices and accessories".into()),
            status: Status::Active,
        };
        assert!(payload.validate().is_ok());
    }
}
