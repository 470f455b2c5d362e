pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
