// src/main.rs

use axum::{
    Router,
    routing::{get, patch},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let dashboard_routes = Router::new()
        .route("/stats", get(handlers::dashboard::get_stats))
        .route("/reports", get(handlers::dashboard::get_reports));

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        // Rota estática antes da captura de {id}
        .route("/low-stock/list", get(handlers::products::list_low_stock))
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .patch(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/{id}/stock", patch(handlers::products::update_stock));

    let category_routes = Router::new()
        .route(
            "/",
            get(handlers::categories::list_categories)
                .post(handlers::categories::create_category),
        )
        .route(
            "/{id}",
            get(handlers::categories::get_category)
                .put(handlers::categories::update_category)
                .patch(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        );

    // Combina tudo no router principal (API versionada em /api/v1)
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/v1/dashboard", dashboard_routes)
        .nest("/api/v1/products", product_routes)
        .nest("/api/v1/categories", category_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = config::server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
