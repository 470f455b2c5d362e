// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_reports,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::list_low_stock,
        handlers::products::update_stock,

        // --- Categories ---
        handlers::categories::list_categories,
        handlers::categories::create_category,
        handlers::categories::get_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,
    ),
    components(
        schemas(
            // --- Inventory ---
            models::inventory::Status,
            models::inventory::Category,
            models::inventory::CategoryWithCount,
            models::inventory::Product,
            models::inventory::ProductWithCategory,
            models::inventory::Paginated<models::inventory::ProductWithCategory>,

            // --- Dashboard ---
            models::dashboard::StatsSummary,
            models::dashboard::DashboardStats,
            models::dashboard::SalesReportEntry,
            models::dashboard::CategoryGroupEntry,
            models::dashboard::MonthlyStatEntry,
            models::dashboard::ReportsResponse,

            // --- Payloads ---
            handlers::categories::CategoryPayload,
            handlers::products::ProductPayload,
            handlers::products::StockAction,
            handlers::products::UpdateStockPayload,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores e relatório simulado"),
        (name = "Products", description = "Gestão de Produtos e Estoque"),
        (name = "Categories", description = "Gestão de Categorias")
    )
)]
pub struct ApiDoc;
