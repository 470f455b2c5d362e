// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("SKU já cadastrado: {0}")]
    SkuAlreadyExists(String),

    #[error("Nome de categoria já cadastrado: {0}")]
    CategoryNameAlreadyExists(String),

    #[error("Categoria informada não existe")]
    CategoryDoesNotExist,

    #[error("Categoria não encontrada")]
    CategoryNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Categoria possui produtos associados")]
    CategoryHasProducts,

    #[error("Payload de estoque inválido: {0}")]
    InvalidStockPayload(String),

    // Corpo/query que nem chegou a desserializar (campo ausente ou tipo errado)
    #[error("Corpo da requisição inválido: {0}")]
    MalformedBody(String),

    #[error("Parâmetros de consulta inválidos: {0}")]
    MalformedQuery(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "message": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::SkuAlreadyExists(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Este SKU já está em uso.".to_string())
            }
            AppError::CategoryNameAlreadyExists(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Já existe uma categoria com este nome.".to_string(),
            ),
            AppError::CategoryDoesNotExist => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "A categoria informada não existe.".to_string(),
            ),
            AppError::CategoryNotFound => {
                (StatusCode::NOT_FOUND, "Categoria não encontrada.".to_string())
            }
            AppError::ProductNotFound => {
                (StatusCode::NOT_FOUND, "Produto não encontrado.".to_string())
            }
            AppError::CategoryHasProducts => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Não é possível excluir uma categoria com produtos associados.".to_string(),
            ),
            AppError::InvalidStockPayload(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::MalformedBody(msg) | AppError::MalformedQuery(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg)
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn conflict_and_validation_map_to_422() {
        assert_eq!(
            AppError::CategoryHasProducts.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::SkuAlreadyExists("WH-001".into()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::CategoryDoesNotExist.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::MalformedBody("campo ausente".into())
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::MalformedQuery("uuid inválido".into())
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn missing_rows_map_to_404() {
        assert_eq!(
            AppError::ProductNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::CategoryNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
