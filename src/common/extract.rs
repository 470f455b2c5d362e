// src/common/extract.rs

use axum::{
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};

use crate::common::error::AppError;

// ---
// Extratores com rejeição mapeada para o contrato de erro da API
// ---
// O Json/Query padrão do axum responde falhas de desserialização com
// texto puro e status próprio. Aqui a falha vira AppError, então campos
// ausentes ou malformados saem como 422 + { "message": ... }, igual ao
// restante da validação.

#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::MalformedBody(rejection.body_text())),
        }
    }
}

#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::MalformedQuery(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        response::IntoResponse,
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct DummyPayload {
        #[allow(dead_code)]
        name: String,
        #[allow(dead_code)]
        quantity: i32,
    }

    #[derive(Debug, Deserialize)]
    struct DummyFilter {
        #[allow(dead_code)]
        page: Option<u32>,
    }

    fn json_request(body: &'static str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_body_field_maps_to_422() {
        let req = json_request(r#"{"name":"Widget"}"#);
        let err = ApiJson::<DummyPayload>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn wrong_body_type_maps_to_422() {
        let req = json_request(r#"{"name":"Widget","quantity":"muitos"}"#);
        let err = ApiJson::<DummyPayload>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn well_formed_body_passes_through() {
        let req = json_request(r#"{"name":"Widget","quantity":10}"#);
        let ApiJson(payload) = ApiJson::<DummyPayload>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(payload.quantity, 10);
    }

    #[tokio::test]
    async fn malformed_query_param_maps_to_422() {
        let req = HttpRequest::builder()
            .uri("/products?page=abc")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = ApiQuery::<DummyFilter>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
