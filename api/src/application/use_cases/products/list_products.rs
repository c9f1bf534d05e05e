use crate::application::error::AppResult;
use crate::application::ports::product_repository::ProductRepository;
use crate::domain::products::Product;

pub struct ListProducts<'a, R: ProductRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProductRepository + ?Sized> ListProducts<'a, R> {
    /// A numeric search also matches the product id.
    pub async fn execute(&self, search: Option<String>) -> AppResult<Vec<Product>> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(self.repo.list(search).await?)
    }
}
