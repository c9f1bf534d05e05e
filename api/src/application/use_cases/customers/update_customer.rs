use super::CustomerInput;
use crate::application::use_cases::non_blank;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::customer_repository::CustomerRepository;
use crate::domain::customers::{Customer, CustomerPatch, normalize_email, normalize_phone};

pub struct UpdateCustomer<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerRepository + ?Sized> UpdateCustomer<'a, R> {
    pub async fn execute(&self, id: i64, input: &CustomerInput) -> AppResult<Customer> {
        let current = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("customer not found"))?;

        let name = match input.name.as_deref() {
            Some(raw) => non_blank(Some(raw))
                .ok_or_else(|| AppError::validation("name cannot be empty"))?
                .to_string(),
            None => current.name,
        };
        let phone = match input.phone.as_deref() {
            Some(raw) => normalize_phone(raw).map_err(AppError::Validation)?,
            None => current.phone,
        };
        let email = match input.email.as_deref() {
            Some(raw) => normalize_email(raw).map_err(AppError::Validation)?,
            None => current.email,
        };
        if input.points.is_some_and(|p| p < 0) {
            return Err(AppError::validation("points cannot be negative"));
        }
        if self.repo.find_by_phone(&phone, Some(id)).await?.is_some() {
            return Err(AppError::conflict("phone number is already registered"));
        }

        self.repo
            .update(
                id,
                &CustomerPatch {
                    name,
                    email,
                    phone,
                    points: input.points,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("customer not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::MemoryStore;
    use crate::domain::customers::NewCustomer;

    #[tokio::test]
    async fn partial_update_keeps_other_fields_and_rederives_tier() {
        let store = MemoryStore::default();
        store.seed_membership("Gold", 500, 10.0);
        let c = store.seed_customer("Budi", "081211112222", 20);
        let uc = UpdateCustomer { repo: &store };
        let updated = uc
            .execute(
                c.id,
                &CustomerInput {
                    points: Some(600),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Budi");
        assert_eq!(updated.phone, "081211112222");
        assert_eq!(updated.tier.as_deref(), Some("Gold"));
    }

    /// Lets a ledger write settle right after the use case reads the row.
    struct SaleAfterRead<'a> {
        store: &'a MemoryStore,
        settled_balance: i64,
    }

    #[async_trait::async_trait]
    impl CustomerRepository for SaleAfterRead<'_> {
        async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Customer>> {
            CustomerRepository::list(self.store, search).await
        }
        async fn get(&self, id: i64) -> anyhow::Result<Option<Customer>> {
            let read = CustomerRepository::get(self.store, id).await;
            self.store.set_points(id, self.settled_balance);
            read
        }
        async fn find_by_phone(
            &self,
            phone: &str,
            exclude_id: Option<i64>,
        ) -> anyhow::Result<Option<Customer>> {
            CustomerRepository::find_by_phone(self.store, phone, exclude_id).await
        }
        async fn create(&self, input: &NewCustomer) -> anyhow::Result<Customer> {
            CustomerRepository::create(self.store, input).await
        }
        async fn update(&self, id: i64, input: &CustomerPatch) -> anyhow::Result<Option<Customer>> {
            CustomerRepository::update(self.store, id, input).await
        }
        async fn count_transactions(&self, id: i64) -> anyhow::Result<i64> {
            CustomerRepository::count_transactions(self.store, id).await
        }
        async fn delete(&self, id: i64) -> anyhow::Result<bool> {
            CustomerRepository::delete(self.store, id).await
        }
        async fn import(&self, rows: &[NewCustomer]) -> anyhow::Result<u64> {
            CustomerRepository::import(self.store, rows).await
        }
    }

    #[tokio::test]
    async fn omitted_points_do_not_overwrite_a_concurrent_sale() {
        let store = MemoryStore::default();
        store.seed_membership("Silver", 105, 5.0);
        let c = store.seed_customer("Budi", "081211112222", 100);
        let repo = SaleAfterRead {
            store: &store,
            settled_balance: 105,
        };
        let uc = UpdateCustomer { repo: &repo };
        let updated = uc
            .execute(
                c.id,
                &CustomerInput {
                    name: Some("Budi Santoso".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Budi Santoso");
        assert_eq!(updated.points, 105);
        assert_eq!(updated.tier.as_deref(), Some("Silver"));
    }

    #[tokio::test]
    async fn taking_another_customers_phone_conflicts() {
        let store = MemoryStore::default();
        store.seed_customer("Siti", "081200000001", 0);
        let c = store.seed_customer("Budi", "081200000002", 0);
        let uc = UpdateCustomer { repo: &store };
        let err = uc
            .execute(
                c.id,
                &CustomerInput {
                    phone: Some("081200000001".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_customer_is_not_found() {
        let store = MemoryStore::default();
        let uc = UpdateCustomer { repo: &store };
        let err = uc.execute(99, &CustomerInput::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
