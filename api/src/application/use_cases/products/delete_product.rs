use crate::application::error::{AppError, AppResult};
use crate::application::ports::product_repository::ProductRepository;

pub struct DeleteProduct<'a, R: ProductRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProductRepository + ?Sized> DeleteProduct<'a, R> {
    /// Products referenced by a transaction surface as a conflict.
    pub async fn execute(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("product not found"));
        }
        Ok(())
    }
}
