// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{DashboardStats, ReportsResponse},
};

// GET /api/v1/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contadores, valor total do inventário e top listas", body = DashboardStats)
    )
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.dashboard_service.get_stats().await?;
    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/v1/dashboard/reports
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/reports",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Relatório de vendas simulado + agrupamentos (dados aleatórios a cada chamada)", body = ReportsResponse)
    )
)]
pub async fn get_reports(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let reports = app_state.dashboard_service.get_reports().await?;
    Ok((StatusCode::OK, Json(reports)))
}
