use super::{ProductInput, check_amounts};
use crate::application::error::{AppError, AppResult};
use crate::application::ports::product_repository::ProductRepository;
use crate::application::use_cases::non_blank;
use crate::domain::products::{NewProduct, Product};

pub struct UpdateProduct<'a, R: ProductRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProductRepository + ?Sized> UpdateProduct<'a, R> {
    /// Full replace: absent notes and price are cleared, absent exchange points reset to 0.
    pub async fn execute(&self, id: i64, input: &ProductInput) -> AppResult<Product> {
        let (Some(name), Some(category)) = (
            non_blank(input.name.as_deref()),
            non_blank(input.category.as_deref()),
        ) else {
            return Err(AppError::validation("name and category are required"));
        };
        let exchange_points = input.exchange_points.unwrap_or(0);
        check_amounts(exchange_points, input.unit_price)?;

        self.repo
            .update(
                id,
                &NewProduct {
                    name: name.to_string(),
                    category: category.to_string(),
                    notes: non_blank(input.notes.as_deref()).map(str::to_string),
                    exchange_points,
                    unit_price: input.unit_price,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("product not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::MemoryStore;

    #[tokio::test]
    async fn replaces_every_field() {
        let store = MemoryStore::default();
        let p = store.seed_product("Latte", 0, Some(25_000));
        let uc = UpdateProduct { repo: &store };
        let updated = uc
            .execute(
                p.id,
                &ProductInput {
                    name: Some("Iced Latte".into()),
                    category: Some("Coffee".into()),
                    exchange_points: Some(30),
                    notes: Some("seasonal".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Iced Latte");
        assert_eq!(updated.unit_price, None);
        assert_eq!(updated.exchange_points, 30);
        assert_eq!(updated.notes.as_deref(), Some("seasonal"));
    }

    #[tokio::test]
    async fn omitted_price_and_points_are_cleared() {
        let store = MemoryStore::default();
        let p = store.seed_product("Latte", 5, Some(25_000));
        let uc = UpdateProduct { repo: &store };
        let updated = uc
            .execute(
                p.id,
                &ProductInput {
                    name: Some("Latte".into()),
                    category: Some("Coffee".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.unit_price, None);
        assert_eq!(updated.exchange_points, 0);
        assert_eq!(updated.notes, None);
    }

    #[tokio::test]
    async fn name_and_category_stay_required() {
        let store = MemoryStore::default();
        let p = store.seed_product("Latte", 0, Some(25_000));
        let uc = UpdateProduct { repo: &store };
        let err = uc
            .execute(
                p.id,
                &ProductInput {
                    name: Some("Latte".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let store = MemoryStore::default();
        let uc = UpdateProduct { repo: &store };
        let err = uc
            .execute(
                99,
                &ProductInput {
                    name: Some("Latte".into()),
                    category: Some("Coffee".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
