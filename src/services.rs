pub mod category_service;
pub use category_service::CategoryService;
pub mod product_service;
pub use product_service::ProductService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
