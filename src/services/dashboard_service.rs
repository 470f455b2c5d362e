// src/services/dashboard_service.rs

use chrono::{Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{
        dashboard::{DashboardStats, ReportsResponse, SalesReportEntry},
        inventory::ProductWithCategory,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_stats(&self) -> Result<DashboardStats, AppError> {
        self.repo.get_stats().await
    }

    /// Relatório de vendas SIMULADO: não existe tabela de transações, então
    /// cada produto vira uma linha com números sorteados a cada chamada.
    /// Serve só para popular a tela de relatórios do frontend.
    pub async fn get_reports(&self) -> Result<ReportsResponse, AppError> {
        let products = self.repo.all_products_with_categories().await?;
        let data = synthesize_sales_reports(&products, &mut rand::rng());

        let products_by_category = self.repo.products_by_category().await?;
        let monthly_stats = self.repo.monthly_stats().await?;

        Ok(ReportsResponse {
            data,
            products_by_category,
            monthly_stats,
        })
    }
}

/// Uma linha sintética por produto: quantidade vendida sorteada em
/// 1..=min(quantity, 50), receita sorteada com 2 casas decimais e data
/// sorteada nos últimos 30 dias.
fn synthesize_sales_reports(
    products: &[ProductWithCategory],
    rng: &mut impl Rng,
) -> Vec<SalesReportEntry> {
    let today = Utc::now().date_naive();

    products
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let cap = product.quantity.min(50);
            let quantity_sold = if cap > 0 { rng.random_range(1..=cap) } else { 0 };
            // Centavos sorteados, igual ao rand(100, 5000) / 100 do original
            let total_revenue = Decimal::new(rng.random_range(100..=5000), 2);
            let date = today - Duration::days(rng.random_range(1..=30));

            SalesReportEntry {
                id: (index + 1) as i64,
                product_name: product.name.clone(),
                product_id: product.id,
                category: product.category.name.clone(),
                quantity_sold,
                total_revenue,
                date,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::{Category, Status};
    use rand::{SeedableRng, rngs::StdRng};
    use uuid::Uuid;

    fn product(name: &str, quantity: i32) -> ProductWithCategory {
        let category = Category {
            id: Uuid::new_v4(),
            name: "Electronics".into(),
            description: None,
            status: Status::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        ProductWithCategory {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            sku: format!("{name}-001"),
            price: Decimal::new(99999, 2),
            quantity,
            category_id: category.id,
            supplier: None,
            reorder_level: 10,
            status: Status::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            category,
        }
    }

    #[test]
    fn report_rows_are_sequential_and_bounded() {
        let products = vec![product("iPhone 15", 50), product("MacBook Pro", 7)];
        let mut rng = StdRng::seed_from_u64(42);
        let rows = synthesize_sales_reports(&products, &mut rng);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[1].id, 2);
        // limitado por min(quantity, 50)
        assert!(rows[0].quantity_sold >= 1 && rows[0].quantity_sold <= 50);
        assert!(rows[1].quantity_sold >= 1 && rows[1].quantity_sold <= 7);
    }

    #[test]
    fn report_dates_fall_in_last_30_days() {
        let products = vec![product("Denim Jeans", 75); 20];
        let mut rng = StdRng::seed_from_u64(7);
        let today = Utc::now().date_naive();

        for row in synthesize_sales_reports(&products, &mut rng) {
            let age = (today - row.date).num_days();
            assert!((1..=30).contains(&age));
        }
    }

    #[test]
    fn zero_stock_sells_nothing() {
        let products = vec![product("Programming Book", 0)];
        let mut rng = StdRng::seed_from_u64(1);
        let rows = synthesize_sales_reports(&products, &mut rng);
        assert_eq!(rows[0].quantity_sold, 0);
    }

    #[test]
    fn revenue_has_two_fraction_digits() {
        let products = vec![product("Cotton T-Shirt", 100)];
        let mut rng = StdRng::seed_from_u64(9);
        let rows = synthesize_sales_reports(&products, &mut rng);
        assert_eq!(rows[0].total_revenue.scale(), 2);
        assert!(rows[0].total_revenue >= Decimal::new(100, 2));
        assert!(rows[0].total_revenue <= Decimal::new(5000, 2));
    }
}
