// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{CategoryRepository, DashboardRepository, ProductRepository},
    services::{CategoryService, DashboardService, ProductService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub category_service: CategoryService,
    pub product_service: ProductService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let category_service = CategoryService::new(CategoryRepository::new(db_pool.clone()));
        let product_service = ProductService::new(ProductRepository::new(db_pool.clone()));
        let dashboard_service = DashboardService::new(DashboardRepository::new(db_pool.clone()));

        Ok(Self {
            db_pool,
            category_service,
            product_service,
            dashboard_service,
        })
    }
}

/// Endereço de escuta do servidor (SERVER_ADDR, com default local).
pub fn server_addr() -> String {
    env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}
