// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// Status compartilhado (categorias e produtos)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "entity_status", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum Status {
    Active,
    Inactive,
}

// ---
// Categorias
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Categoria anotada com a contagem de produtos (GET /categories)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub products_count: i64,
}

// ---
// Produtos
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: Uuid,
    pub supplier: Option<String>,
    pub reorder_level: i32,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Estoque baixo: quantidade no nível de reposição ou abaixo dele.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }
}

// Produto com a categoria embutida (forma padrão de leitura da API)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: Uuid,
    pub supplier: Option<String>,
    pub reorder_level: i32,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Category,
}

// Linha "achatada" do JOIN products x categories.
// As colunas da categoria vêm com alias c_* para não colidir com as do produto.
#[derive(Debug, Clone, FromRow)]
pub struct ProductCategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: Uuid,
    pub supplier: Option<String>,
    pub reorder_level: i32,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub c_name: String,
    pub c_description: Option<String>,
    pub c_status: Status,
    pub c_created_at: DateTime<Utc>,
    pub c_updated_at: DateTime<Utc>,
}

impl From<ProductCategoryRow> for ProductWithCategory {
    fn from(row: ProductCategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            sku: row.sku,
            price: row.price,
            quantity: row.quantity,
            category_id: row.category_id,
            supplier: row.supplier,
            reorder_level: row.reorder_level,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            category: Category {
                id: row.category_id,
                name: row.c_name,
                description: row.c_description,
                status: row.c_status,
                created_at: row.c_created_at,
                updated_at: row.c_updated_at,
            },
        }
    }
}

// Campos de escrita de um produto (create e update usam o mesmo conjunto)
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: Uuid,
    pub supplier: Option<String>,
    pub reorder_level: i32,
    pub status: Status,
}

// ---
// Mutação de estoque
// ---
// Operação já resolvida a partir do payload dual-mode do PATCH /stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockChange {
    /// Ajuste relativo com sinal; o resultado trava em zero.
    Adjust(i32),
    /// Soma uma quantidade absoluta (>= 0).
    Add(i32),
    /// Subtrai uma quantidade absoluta; o resultado trava em zero.
    Subtract(i32),
    /// Sobrescreve a quantidade.
    Set(i32),
}

impl StockChange {
    /// Mesma aritmética que o UPDATE executa no banco (GREATEST(0, ...)).
    pub fn apply(self, current: i32) -> i32 {
        match self {
            StockChange::Adjust(delta) => (current + delta).max(0),
            StockChange::Add(amount) => current + amount,
            StockChange::Subtract(amount) => (current - amount).max(0),
            StockChange::Set(amount) => amount,
        }
    }
}

// ---
// Filtros de listagem de produtos
// ---
// Struct explícita de filtros, consumida por uma única função de montagem
// de query no repositório. Todos os campos opcionais, combinados com AND;
// 'search' é um OR de substring sobre name/sku/description.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "snake_case")]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<Status>,
    pub low_stock: Option<bool>,
    pub page: Option<u32>,
}

// ---
// Envelope de paginação (página fixa de 15 itens)
// ---
pub const PRODUCTS_PER_PAGE: u32 = 15;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub per_page: u32,
    pub total: i64,
    pub last_page: u32,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, current_page: u32, per_page: u32, total: i64) -> Self {
        let last_page = if total <= 0 {
            1
        } else {
            (total as u64).div_ceil(u64::from(per_page)) as u32
        };
        Self {
            data,
            current_page,
            per_page,
            total,
            last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i32, reorder_level: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Wireless Headphones".into(),
            description: None,
            sku: "WH-001".into(),
            price: Decimal::new(29999, 2),
            quantity,
            category_id: Uuid::new_v4(),
            supplier: Some("Sony".into()),
            reorder_level,
            status: Status::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn low_stock_at_or_below_reorder_level() {
        assert!(product(8, 15).is_low_stock());
        assert!(product(15, 15).is_low_stock()); // limite conta como baixo
        assert!(!product(50, 10).is_low_stock());
    }

    #[test]
    fn paginated_last_page_rounds_up() {
        let page = Paginated::new(vec![1, 2, 3], 1, 15, 31);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.per_page, 15);
    }

    #[test]
    fn paginated_empty_has_one_page() {
        let page: Paginated<i32> = Paginated::new(vec![], 1, 15, 0);
        assert_eq!(page.last_page, 1);
        assert_eq!(page.total, 0);
    }

    #[test]
    fn adjust_clamps_at_zero() {
        assert_eq!(StockChange::Adjust(-10).apply(5), 0);
        assert_eq!(StockChange::Adjust(3).apply(5), 8);
        assert_eq!(StockChange::Adjust(-5).apply(5), 0);
    }

    #[test]
    fn absolute_actions() {
        assert_eq!(StockChange::Add(7).apply(5), 12);
        assert_eq!(StockChange::Subtract(10).apply(5), 0);
        assert_eq!(StockChange::Subtract(2).apply(5), 3);
        assert_eq!(StockChange::Set(42).apply(5), 42);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Active).unwrap(), "\"active\"");
        let s: Status = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(s, Status::Inactive);
    }
}
