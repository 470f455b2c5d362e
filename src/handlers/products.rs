// src/handlers/products.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::AppError,
        extract::{ApiJson, ApiQuery},
    },
    config::AppState,
    models::inventory::{
        Paginated, ProductFields, ProductFilter, ProductWithCategory, Status, StockChange,
    },
};

// ---
// Validação customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: criação e atualização usam o mesmo conjunto de campos
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 255, message = "O nome é obrigatório e deve ter no máximo 255 caracteres."))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 255, message = "O SKU é obrigatório e deve ter no máximo 255 caracteres."))]
    pub sku: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub quantity: i32,

    pub category_id: Uuid,

    #[validate(length(max = 255, message = "O fornecedor deve ter no máximo 255 caracteres."))]
    pub supplier: Option<String>,

    #[validate(range(min = 0, message = "O nível de reposição não pode ser negativo."))]
    pub reorder_level: i32,

    pub status: Status,
}

impl ProductPayload {
    fn into_fields(self) -> ProductFields {
        ProductFields {
            name: self.name,
            description: self.description,
            sku: self.sku,
            price: self.price,
            quantity: self.quantity,
            category_id: self.category_id,
            supplier: self.supplier,
            reorder_level: self.reorder_level,
            status: self.status,
        }
    }
}

// ---
// Payload: PATCH /products/{id}/stock (dois modos)
// ---
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StockAction {
    Add,
    Subtract,
    Set,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockPayload {
    /// Modo relativo: ajuste com sinal (ex.: +1, -3).
    pub adjustment: Option<i32>,
    /// Modo absoluto: quantidade >= 0, combinada com 'action'.
    pub quantity: Option<i32>,
    pub action: Option<StockAction>,
}

impl UpdateStockPayload {
    /// Resolve o modo do payload. 'adjustment' presente ganha; caso
    /// contrário 'quantity' é obrigatório e 'action' ausente sobrescreve.
    pub fn to_change(&self) -> Result<StockChange, AppError> {
        if let Some(adjustment) = self.adjustment {
            return Ok(StockChange::Adjust(adjustment));
        }

        let quantity = self.quantity.ok_or_else(|| {
            AppError::InvalidStockPayload(
                "O campo 'quantity' é obrigatório quando 'adjustment' não é informado.".into(),
            )
        })?;
        if quantity < 0 {
            return Err(AppError::InvalidStockPayload(
                "A quantidade não pode ser negativa.".into(),
            ));
        }

        Ok(match self.action {
            Some(StockAction::Add) => StockChange::Add(quantity),
            Some(StockAction::Subtract) => StockChange::Subtract(quantity),
            Some(StockAction::Set) | None => StockChange::Set(quantity),
        })
    }
}

// GET /api/v1/products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Página de produtos (15 por página) com categoria embutida", body = Paginated<ProductWithCategory>)
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    ApiQuery(filter): ApiQuery<ProductFilter>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state.product_service.list(&filter).await?;
    Ok((StatusCode::OK, Json(page)))
}

// POST /api/v1/products
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = ProductWithCategory),
        (status = 422, description = "Validação falhou, SKU duplicado ou categoria inexistente")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .create(&payload.into_fields())
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/v1/products/{id}
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto com categoria embutida", body = ProductWithCategory),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.product_service.get(id).await?;
    Ok((StatusCode::OK, Json(product)))
}

// PUT/PATCH /api/v1/products/{id}
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = ProductWithCategory),
        (status = 404, description = "Produto não encontrado"),
        (status = 422, description = "Validação falhou, SKU duplicado ou categoria inexistente")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .update(id, &payload.into_fields())
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/v1/products/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto excluído"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.delete(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Produto excluído com sucesso." })),
    ))
}

// GET /api/v1/products/low-stock/list
#[utoipa::path(
    get,
    path = "/api/v1/products/low-stock/list",
    tag = "Products",
    responses(
        (status = 200, description = "Todos os produtos em estoque baixo (sem paginação)", body = Vec<ProductWithCategory>)
    )
)]
pub async fn list_low_stock(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.list_low_stock().await?;
    Ok((StatusCode::OK, Json(products)))
}

// PATCH /api/v1/products/{id}/stock
#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}/stock",
    tag = "Products",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateStockPayload,
    responses(
        (status = 200, description = "Estoque atualizado (nunca negativo)", body = ProductWithCategory),
        (status = 404, description = "Produto não encontrado"),
        (status = 422, description = "Payload de estoque inválido")
    )
)]
pub async fn update_stock(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    let change = payload.to_change()?;

    let product = app_state.product_service.adjust_stock(id, change).await?;
    Ok((StatusCode::OK, Json(product)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_payload() -> ProductPayload {
        ProductPayload {
            name: "Widget".into(),
            description: None,
            sku: "W-1".into(),
            price: Decimal::new(999, 2),
            quantity: 10,
            category_id: Uuid::new_v4(),
            supplier: None,
            reorder_level: 2,
            status: Status::Active,
        }
    }

    #[test]
    fn valid_product_payload_passes() {
        assert!(base_payload().validate().is_ok());
    }

    #[test]
    fn negative_price_fails_validation() {
        let mut payload = base_payload();
        payload.price = Decimal::new(-1, 2);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn negative_quantity_fails_validation() {
        let mut payload = base_payload();
        payload.quantity = -1;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn empty_sku_fails_validation() {
        let mut payload = base_payload();
        payload.sku = String::new();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn overlong_sku_fails_validation() {
        // a coluna é VARCHAR(255); o excesso precisa parar na validação
        let mut payload = base_payload();
        payload.sku = "X".repeat(300);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn adjustment_mode_wins_over_quantity() {
        let payload = UpdateStockPayload {
            adjustment: Some(-10),
            quantity: Some(3),
            action: None,
        };
        assert_eq!(payload.to_change().unwrap(), StockChange::Adjust(-10));
    }

    #[test]
    fn absolute_mode_requires_quantity() {
        let payload = UpdateStockPayload {
            adjustment: None,
            quantity: None,
            action: Some(StockAction::Add),
        };
        assert!(matches!(
            payload.to_change(),
            Err(AppError::InvalidStockPayload(_))
        ));
    }

    #[test]
    fn negative_absolute_quantity_is_rejected() {
        let payload = UpdateStockPayload {
            adjustment: None,
            quantity: Some(-5),
            action: None,
        };
        assert!(matches!(
            payload.to_change(),
            Err(AppError::InvalidStockPayload(_))
        ));
    }

    #[test]
    fn missing_action_means_overwrite() {
        let payload = UpdateStockPayload {
            adjustment: None,
            quantity: Some(12),
            action: None,
        };
        assert_eq!(payload.to_change().unwrap(), StockChange::Set(12));
    }

    #[test]
    fn actions_map_to_changes() {
        for (action, expected) in [
            (StockAction::Add, StockChange::Add(4)),
            (StockAction::Subtract, StockChange::Subtract(4)),
            (StockAction::Set, StockChange::Set(4)),
        ] {
            let payload = UpdateStockPayload {
                adjustment: None,
                quantity: Some(4),
                action: Some(action),
            };
            assert_eq!(payload.to_change().unwrap(), expected);
        }
    }
}
