use sqlx::SqliteConnection;

use crate::error::ServiceError;
use crate::models::{Customer, CustomerAdd, CustomerDetail, CustomerUpdate, Message, NewCustomer};
use crate::store::{Enrollments, Store};
use crate::validation::Validator;

/// Customer lifecycle bound to one unit of work.
pub struct CustomerService<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CustomerService<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    fn customers(&mut self) -> Store<'_, Customer> {
        Store::new(&mut *self.conn)
    }

    async fn find(&mut self, id: i64) -> Result<Customer, ServiceError> {
        self.customers()
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} does not exist", id)))
    }

    pub async fn list_customers(&mut self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.customers().get_all().await?)
    }

    /// The customer together with the shows they are enrolled in.
    pub async fn get_customer(&mut self, id: i64) -> Result<CustomerDetail, ServiceError> {
        let customer = self.find(id).await?;
        let show_list = Enrollments::new(&mut *self.conn).shows_of(id).await?;
        Ok(CustomerDetail {
            customer,
            show_list,
        })
    }

    /// Create a customer. Name and age are both required; age must be 5..=120.
    pub async fn enroll_customer(&mut self, payload: CustomerAdd) -> Result<Customer, ServiceError> {
        let name = Validator::require("name", payload.name)?;
        let age = Validator::require("age", payload.age)?;
        Validator::validate_name("name", &name)?;
        Validator::validate_age(age)?;

        let customer = self.customers().add(&NewCustomer { name, age }).await?;
        tracing::info!("Customer {} created", customer.id);
        Ok(customer)
    }

    pub async fn delete_customer(&mut self, id: i64) -> Result<Message, ServiceError> {
        let customer = self.find(id).await?;
        self.customers().delete(customer.id).await?;

        tracing::info!("Customer {} deleted", customer.id);
        Ok(Message::new(format!("Customer {} has been removed", customer.id)))
    }

    /// Apply the fields present in `payload`; absent fields are left as they are.
    pub async fn update_customer(
        &mut self,
        id: i64,
        payload: CustomerUpdate,
    ) -> Result<Customer, ServiceError> {
        let mut customer = self.find(id).await?;

        if let Some(name) = payload.name {
            Validator::validate_name("name", &name)?;
            customer.name = name;
        }
        if let Some(age) = payload.age {
            Validator::validate_age(age)?;
            customer.age = age;
        }

        self.customers().save(&customer).await?;
        tracing::info!("Customer {} updated", customer.id);
        Ok(customer)
    }
}
