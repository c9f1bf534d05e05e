use super::CustomerInput;
use crate::application::use_cases::non_blank;
use crate::application::error::{AppError, AppResult};
use crate::application::ports::customer_repository::CustomerRepository;
use crate::domain::customers::{Customer, NewCustomer, normalize_email, normalize_phone};

pub struct CreateCustomer<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerRepository + ?Sized> CreateCustomer<'a, R> {
    pub async fn execute(&self, input: &CustomerInput) -> AppResult<Customer> {
        let (Some(name), Some(phone)) = (
            non_blank(input.name.as_deref()),
            non_blank(input.phone.as_deref()),
        ) else {
            return Err(AppError::validation("name and phone are required"));
        };
        let phone = normalize_phone(phone).map_err(AppError::Validation)?;
        let email = match input.email.as_deref() {
            Some(raw) => normalize_email(raw).map_err(AppError::Validation)?,
            None => None,
        };
        let points = input.points.unwrap_or(0);
        if points < 0 {
            return Err(AppError::validation("points cannot be negative"));
        }
        if self.repo.find_by_phone(&phone, None).await?.is_some() {
            return Err(AppError::conflict("phone number is already registered"));
        }
        let customer = self
            .repo
            .create(&NewCustomer {
                name: name.to_string(),
                email,
                phone,
                points,
            })
            .await?;
        tracing::debug!(customer_id = customer.id, "customer_created");
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::MemoryStore;

    #[tokio::test]
    async fn creates_with_derived_tier() {
        let store = MemoryStore::default();
        store.seed_membership("Silver", 100, 5.0);
        store.seed_membership("Gold", 500, 10.0);
        let uc = CreateCustomer { repo: &store };
        let c = uc
            .execute(&CustomerInput {
                name: Some(" Budi ".into()),
                email: Some("".into()),
                phone: Some("0812-1111-2222".into()),
                points: Some(150),
            })
            .await
            .unwrap();
        assert_eq!(c.name, "Budi");
        assert_eq!(c.phone, "081211112222");
        assert_eq!(c.email, None);
        assert_eq!(c.tier.as_deref(), Some("Silver"));
    }

    #[tokio::test]
    async fn duplicate_phone_conflicts() {
        let store = MemoryStore::default();
        store.seed_customer("Siti", "081211112222", 0);
        let uc = CreateCustomer { repo: &store };
        let err = uc
            .execute(&CustomerInput {
                name: Some("Budi".into()),
                phone: Some("0812 1111 2222".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn phone_is_required_and_validated() {
        let store = MemoryStore::default();
        let uc = CreateCustomer { repo: &store };
        let missing = CustomerInput {
            name: Some("Budi".into()),
            ..Default::default()
        };
        assert!(matches!(uc.execute(&missing).await, Err(AppError::Validation(_))));
        let bad = CustomerInput {
            name: Some("Budi".into()),
            phone: Some("call me".into()),
            ..Default::default()
        };
        assert!(matches!(uc.execute(&bad).await, Err(AppError::Validation(_))));
    }
}
