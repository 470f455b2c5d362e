// src/services/category_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CategoryRepository,
    models::inventory::{Category, CategoryWithCount, Status},
};

#[derive(Clone)]
pub struct CategoryService {
    repo: CategoryRepository,
}

impl CategoryService {
    pub fn new(repo: CategoryRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<CategoryWithCount>, AppError> {
        self.repo.list_with_counts().await
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryWithCount, AppError> {
        self.repo
            .find_with_count(id)
            .await?
            .ok_or(AppError::CategoryNotFound)
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        status: Status,
    ) -> Result<Category, AppError> {
        self.repo.insert(name, description, status).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        status: Status,
    ) -> Result<Category, AppError> {
        self.repo
            .update(id, name, description, status)
            .await?
            .ok_or(AppError::CategoryNotFound)
    }

    /// Exclusão com guard: categoria com produtos associados não sai.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.repo.product_count(id).await? > 0 {
            return Err(AppError::CategoryHasProducts);
        }
        let deleted = self.repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::CategoryNotFound);
        }
        Ok(())
    }
}
