// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{CategoryGroupEntry, DashboardStats, MonthlyStatEntry, StatsSummary},
        inventory::{CategoryWithCount, ProductCategoryRow, ProductWithCategory},
    },
};

const SELECT_WITH_CATEGORY: &str = r#"
    SELECT p.id, p.name, p.description, p.sku, p.price, p.quantity,
           p.category_id, p.supplier, p.reorder_level, p.status,
           p.created_at, p.updated_at,
           c.name AS c_name, c.description AS c_description, c.status AS c_status,
           c.created_at AS c_created_at, c.updated_at AS c_updated_at
    FROM products p
    JOIN categories c ON c.id = p.category_id
"#;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Agregados do painel. Roda tudo dentro de uma transação para obter
    /// um snapshot consistente entre contadores e listas.
    pub async fn get_stats(&self) -> Result<DashboardStats, AppError> {
        let mut tx = self.pool.begin().await?;

        let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;

        let total_categories: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *tx)
            .await?;

        let low_stock_products: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE quantity <= reorder_level",
        )
        .fetch_one(&mut *tx)
        .await?;

        let total_inventory_value: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(price * quantity), 0) FROM products",
        )
        .fetch_one(&mut *tx)
        .await?;

        // Os 5 produtos mais recentes
        let sql = format!("{SELECT_WITH_CATEGORY} ORDER BY p.created_at DESC LIMIT 5");
        let recent_rows = sqlx::query_as::<_, ProductCategoryRow>(&sql)
            .fetch_all(&mut *tx)
            .await?;

        // As 5 categorias com mais produtos
        let top_categories = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT c.id, c.name, c.description, c.status, c.created_at, c.updated_at,
                   COUNT(p.id) AS products_count
            FROM categories c
            LEFT JOIN products p ON p.category_id = c.id
            GROUP BY c.id
            ORDER BY products_count DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        // Até 10 produtos em estoque baixo
        let sql = format!(
            "{SELECT_WITH_CATEGORY} WHERE p.quantity <= p.reorder_level ORDER BY p.name ASC LIMIT 10"
        );
        let low_stock_rows = sqlx::query_as::<_, ProductCategoryRow>(&sql)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(DashboardStats {
            stats: StatsSummary {
                total_products,
                total_categories,
                low_stock_products,
                total_inventory_value,
            },
            recent_products: recent_rows.into_iter().map(Into::into).collect(),
            top_categories,
            low_stock_items: low_stock_rows.into_iter().map(Into::into).collect(),
        })
    }

    /// Todos os produtos com categoria (base do relatório de vendas simulado).
    pub async fn all_products_with_categories(
        &self,
    ) -> Result<Vec<ProductWithCategory>, AppError> {
        let sql = format!("{SELECT_WITH_CATEGORY} ORDER BY p.name ASC");
        let rows = sqlx::query_as::<_, ProductCategoryRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Produtos agrupados por categoria com quantidade e valor agregados.
    pub async fn products_by_category(&self) -> Result<Vec<CategoryGroupEntry>, AppError> {
        let groups = sqlx::query_as::<_, CategoryGroupEntry>(
            r#"
            SELECT c.id AS category_id,
                   c.name AS category_name,
                   COUNT(p.id) AS products_count,
                   COALESCE(SUM(p.quantity), 0)::BIGINT AS total_quantity,
                   COALESCE(SUM(p.price * p.quantity), 0) AS total_value
            FROM categories c
            LEFT JOIN products p ON p.category_id = c.id
            GROUP BY c.id, c.name
            ORDER BY c.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(groups)
    }

    /// Produtos cadastrados por mês do ano corrente.
    pub async fn monthly_stats(&self) -> Result<Vec<MonthlyStatEntry>, AppError> {
        let stats = sqlx::query_as::<_, MonthlyStatEntry>(
            r#"
            SELECT EXTRACT(MONTH FROM created_at)::INT AS month,
                   EXTRACT(YEAR FROM created_at)::INT AS year,
                   COUNT(*) AS products_added,
                   COALESCE(SUM(quantity), 0)::BIGINT AS total_quantity
            FROM products
            WHERE EXTRACT(YEAR FROM created_at) = EXTRACT(YEAR FROM now())
            GROUP BY 1, 2
            ORDER BY 1 ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }
}
