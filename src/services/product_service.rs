// src/services/product_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProductRepository,
    models::inventory::{
        PRODUCTS_PER_PAGE, Paginated, ProductFields, ProductFilter, ProductWithCategory,
        StockChange,
    },
};

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    /// Listagem filtrada com página fixa de 15 itens.
    pub async fn list(
        &self,
        filter: &ProductFilter,
    ) -> Result<Paginated<ProductWithCategory>, AppError> {
        let page = filter.page.unwrap_or(1).max(1);
        let per_page = PRODUCTS_PER_PAGE;
        let offset = i64::from(page - 1) * i64::from(per_page);

        let (data, total) = self
            .repo
            .list_filtered(filter, i64::from(per_page), offset)
            .await?;

        Ok(Paginated::new(data, page, per_page, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductWithCategory, AppError> {
        self.repo
            .find_with_category(id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn create(&self, fields: &ProductFields) -> Result<ProductWithCategory, AppError> {
        let product = self.repo.insert(fields).await?;
        // Recarrega com a categoria embutida (a resposta padrão da API)
        self.repo
            .find_with_category(product.id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn update(
        &self,
        id: Uuid,
        fields: &ProductFields,
    ) -> Result<ProductWithCategory, AppError> {
        let product = self
            .repo
            .update(id, fields)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        self.repo
            .find_with_category(product.id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    pub async fn list_low_stock(&self) -> Result<Vec<ProductWithCategory>, AppError> {
        self.repo.list_low_stock().await
    }

    /// Mutação de estoque já resolvida pelo handler (ajuste relativo ou
    /// quantidade absoluta). O clamp em zero acontece no próprio UPDATE.
    pub async fn adjust_stock(
        &self,
        id: Uuid,
        change: StockChange,
    ) -> Result<ProductWithCategory, AppError> {
        let product = self
            .repo
            .update_stock(id, change)
            .await?
            .ok_or(AppError::ProductNotFound)?;
        self.repo
            .find_with_category(product.id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }
}
