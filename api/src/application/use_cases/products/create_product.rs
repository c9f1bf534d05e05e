use super::{ProductInput, check_amounts};
use crate::application::error::{AppError, AppResult};
use crate::application::ports::product_repository::ProductRepository;
use crate::application::use_cases::non_blank;
use crate::domain::products::{NewProduct, Product};

pub struct CreateProduct<'a, R: ProductRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProductRepository + ?Sized> CreateProduct<'a, R> {
    pub async fn execute(&self, input: &ProductInput) -> AppResult<Product> {
        let (Some(name), Some(category)) = (
            non_blank(input.name.as_deref()),
            non_blank(input.category.as_deref()),
        ) else {
            return Err(AppError::validation("name and category are required"));
        };
        let exchange_points = input.exchange_points.unwrap_or(0);
        check_amounts(exchange_points, input.unit_price)?;
        Ok(self
            .repo
            .create(&NewProduct {
                name: name.to_string(),
                category: category.to_string(),
                notes: non_blank(input.notes.as_deref()).map(str::to_string),
                exchange_points,
                unit_price: input.unit_price,
            })
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::MemoryStore;

    #[tokio::test]
    async fn duplicate_name_maps_to_conflict() {
        let store = MemoryStore::default();
        store.seed_product("Latte", 0, None);
        let uc = CreateProduct { repo: &store };
        let err = uc
            .execute(&ProductInput {
                name: Some("Latte".into()),
                category: Some("Coffee".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(msg) if msg.contains("name")));
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let store = MemoryStore::default();
        let uc = CreateProduct { repo: &store };
        let err = uc
            .execute(&ProductInput {
                name: Some("Mocha".into()),
                category: Some("Coffee".into()),
                unit_price: Some(-1),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
