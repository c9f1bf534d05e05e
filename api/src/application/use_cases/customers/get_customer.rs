use crate::application::error::{AppError, AppResult};
use crate::application::ports::customer_repository::CustomerRepository;
use crate::domain::customers::Customer;

pub struct GetCustomer<'a, R: CustomerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CustomerRepository + ?Sized> GetCustomer<'a, R> {
    pub async fn execute(&self, id: i64) -> AppResult<Customer> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("customer not found"))
    }
}
