use crate::application::error::AppResult;
use crate::application::ports::customer_repository::CustomerRepository;
use crate::domain::customers::Customer;

pub struct ListCustomers<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerRepository + ?Sized> ListCustomers<'a, R> {
    pub async fn execute(&self, search: Option<String>) -> AppResult<Vec<Customer>> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(self.repo.list(search).await?)
    }
}
