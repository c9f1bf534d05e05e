use crate::application::error::{AppError, AppResult};
use crate::application::ports::product_repository::ProductRepository;
use crate::domain::products::Product;

pub struct GetProduct<'a, R: ProductRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProductRepository + ?Sized> GetProduct<'a, R> {
    pub async fn execute(&self, id: i64) -> AppResult<Product> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("product not found"))
    }
}
