// src/db/category_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Category, CategoryWithCount, Status},
};

// SELECT base: categoria + contagem de produtos associados
const SELECT_WITH_COUNT: &str = r#"
    SELECT c.id, c.name, c.description, c.status, c.created_at, c.updated_at,
           COUNT(p.id) AS products_count
    FROM categories c
    LEFT JOIN products p ON p.category_id = c.id
"#;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn list_with_counts(&self) -> Result<Vec<CategoryWithCount>, AppError> {
        let sql = format!("{SELECT_WITH_COUNT} GROUP BY c.id ORDER BY c.name ASC");
        let categories = sqlx::query_as::<_, CategoryWithCount>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn find_with_count(&self, id: Uuid) -> Result<Option<CategoryWithCount>, AppError> {
        let sql = format!("{SELECT_WITH_COUNT} WHERE c.id = $1 GROUP BY c.id");
        let category = sqlx::query_as::<_, CategoryWithCount>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    /// Contagem usada pelo guard de exclusão.
    pub async fn product_count(&self, id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE category_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    // ---
    // Escrita
    // ---

    pub async fn insert(
        &self,
        name: &str,
        description: Option<&str>,
        status: Status,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, status)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, status, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_category_unique(e, name))
    }

    /// Atualização de linha inteira. A unicidade do nome exclui a própria
    /// linha por construção: atualizar para o nome atual não viola a constraint.
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        status: Status,
    ) -> Result<Option<Category>, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, description = $3, status = $4, updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_category_unique(e, name))
    }

    /// Remove a linha. O guard de produtos associados fica no service.
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn map_category_unique(e: sqlx::Error, name: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::CategoryNameAlreadyExists(name.to_string());
        }
    }
    e.into()
}
