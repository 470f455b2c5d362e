// src/db/product_repo.rs

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{
        Product, ProductCategoryRow, ProductFields, ProductFilter, ProductWithCategory,
        StockChange,
    },
};

// Projeção do produto com a categoria embutida. As colunas da categoria
// recebem alias c_* (ver ProductCategoryRow).
const SELECT_WITH_CATEGORY: &str = r#"
    SELECT p.id, p.name, p.description, p.sku, p.price, p.quantity,
           p.category_id, p.supplier, p.reorder_level, p.status,
           p.created_at, p.updated_at,
           c.name AS c_name, c.description AS c_description, c.status AS c_status,
           c.created_at AS c_created_at, c.updated_at AS c_updated_at
    FROM products p
    JOIN categories c ON c.id = p.category_id
"#;

/// Única função de montagem dos filtros de listagem: recebe a struct de
/// opções e anexa as cláusulas correspondentes (AND entre filtros; OR de
/// substring dentro de 'search').
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    qb.push(" WHERE TRUE");

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        qb.push(" AND (p.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.sku ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(category_id) = filter.category_id {
        qb.push(" AND p.category_id = ").push_bind(category_id);
    }

    if let Some(status) = filter.status {
        qb.push(" AND p.status = ").push_bind(status);
    }

    if filter.low_stock == Some(true) {
        qb.push(" AND p.quantity <= p.reorder_level");
    }
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    /// Página filtrada + total de linhas que casam com o filtro.
    pub async fn list_filtered(
        &self,
        filter: &ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProductWithCategory>, i64), AppError> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::new(SELECT_WITH_CATEGORY);
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY p.created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<ProductCategoryRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    pub async fn find_with_category(
        &self,
        id: Uuid,
    ) -> Result<Option<ProductWithCategory>, AppError> {
        let sql = format!("{SELECT_WITH_CATEGORY} WHERE p.id = $1");
        let row = sqlx::query_as::<_, ProductCategoryRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Todos os produtos no nível de reposição ou abaixo (sem paginação).
    pub async fn list_low_stock(&self) -> Result<Vec<ProductWithCategory>, AppError> {
        let sql = format!(
            "{SELECT_WITH_CATEGORY} WHERE p.quantity <= p.reorder_level ORDER BY p.name ASC"
        );
        let rows = sqlx::query_as::<_, ProductCategoryRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    // ---
    // Escrita
    // ---

    pub async fn insert(&self, fields: &ProductFields) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (name, description, sku, price, quantity, category_id,
                 supplier, reorder_level, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, description, sku, price, quantity, category_id,
                      supplier, reorder_level, status, created_at, updated_at
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.sku)
        .bind(fields.price)
        .bind(fields.quantity)
        .bind(fields.category_id)
        .bind(&fields.supplier)
        .bind(fields.reorder_level)
        .bind(fields.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_product_constraint(e, &fields.sku))
    }

    /// Atualização de linha inteira. A unicidade do SKU exclui a própria
    /// linha por construção (regravar o próprio SKU não viola a constraint).
    pub async fn update(
        &self,
        id: Uuid,
        fields: &ProductFields,
    ) -> Result<Option<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, description = $3, sku = $4, price = $5, quantity = $6,
                category_id = $7, supplier = $8, reorder_level = $9, status = $10,
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, sku, price, quantity, category_id,
                      supplier, reorder_level, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.sku)
        .bind(fields.price)
        .bind(fields.quantity)
        .bind(fields.category_id)
        .bind(&fields.supplier)
        .bind(fields.reorder_level)
        .bind(fields.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_product_constraint(e, &fields.sku))
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Aplica a mutação de estoque em um único UPDATE. A aritmética e o
    /// clamp em zero acontecem no banco (GREATEST), então ajustes
    /// concorrentes serializam na própria linha.
    pub async fn update_stock(
        &self,
        id: Uuid,
        change: StockChange,
    ) -> Result<Option<Product>, AppError> {
        let (expr, amount) = match change {
            StockChange::Adjust(delta) => ("GREATEST(0, quantity + $2)", delta),
            StockChange::Add(amount) => ("quantity + $2", amount),
            StockChange::Subtract(amount) => ("GREATEST(0, quantity - $2)", amount),
            StockChange::Set(amount) => ("$2", amount),
        };
        let sql = format!(
            r#"
            UPDATE products
            SET quantity = {expr}, updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, sku, price, quantity, category_id,
                      supplier, reorder_level, status, created_at, updated_at
            "#
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(amount)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }
}

fn map_product_constraint(e: sqlx::Error, sku: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::SkuAlreadyExists(sku.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return AppError::CategoryDoesNotExist;
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_builds_bare_where() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        push_filters(&mut qb, &ProductFilter::default());
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM products p WHERE TRUE");
    }

    #[test]
    fn search_expands_to_or_over_three_columns() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        let filter = ProductFilter {
            search: Some("phone".into()),
            ..Default::default()
        };
        push_filters(&mut qb, &filter);
        let sql = qb.sql();
        assert!(sql.contains("p.name ILIKE"));
        assert!(sql.contains("OR p.sku ILIKE"));
        assert!(sql.contains("OR p.description ILIKE"));
    }

    #[test]
    fn filters_compose_with_and() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        let filter = ProductFilter {
            category_id: Some(Uuid::new_v4()),
            low_stock: Some(true),
            ..Default::default()
        };
        push_filters(&mut qb, &filter);
        let sql = qb.sql();
        assert!(sql.contains("AND p.category_id ="));
        assert!(sql.contains("AND p.quantity <= p.reorder_level"));
    }

    #[test]
    fn low_stock_false_adds_nothing() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        let filter = ProductFilter {
            low_stock: Some(false),
            ..Default::default()
        };
        push_filters(&mut qb, &filter);
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM products p WHERE TRUE");
    }

    #[test]
    fn empty_search_is_ignored() {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        let filter = ProductFilter {
            search: Some(String::new()),
            ..Default::default()
        };
        push_filters(&mut qb, &filter);
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM products p WHERE TRUE");
    }
}
