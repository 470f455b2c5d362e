// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::inventory::{CategoryWithCount, ProductWithCategory};

// 1. Os contadores do topo do painel
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_products: i64,
    pub total_categories: i64,
    pub low_stock_products: i64,
    pub total_inventory_value: Decimal, // soma de price * quantity
}

// 2. Resposta completa de GET /dashboard/stats
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub stats: StatsSummary,
    pub recent_products: Vec<ProductWithCategory>,
    pub top_categories: Vec<CategoryWithCount>,
    pub low_stock_items: Vec<ProductWithCategory>,
}

// 3. Linha do relatório de vendas simulado (uma por produto)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportEntry {
    pub id: i64, // sequencial, 1-based
    pub product_name: String,
    pub product_id: Uuid,
    pub category: String,
    pub quantity_sold: i32,
    pub total_revenue: Decimal,
    pub date: NaiveDate,
}

// 4. Produtos agrupados por categoria (quantidade e valor agregados)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroupEntry {
    pub category_id: Uuid,
    pub category_name: String,
    pub products_count: i64,
    pub total_quantity: i64,
    pub total_value: Decimal,
}

// 5. Produtos cadastrados por mês do ano corrente
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatEntry {
    pub month: i32,
    pub year: i32,
    pub products_added: i64,
    pub total_quantity: i64,
}

// 6. Resposta completa de GET /dashboard/reports
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportsResponse {
    pub data: Vec<SalesReportEntry>,
    pub products_by_category: Vec<CategoryGroupEntry>,
    pub monthly_stats: Vec<MonthlyStatEntry>,
}
