use std::sync::Mutex;

use async_trait::async_trait;

use models::customer;

use super::CustomerStore;
use crate::customer::domain::NewCustomer;
use crate::errors::ServiceError;

/// In-memory backend holding records in an owned, mutex-guarded vector.
///
/// Each instance owns its records; there is no process-wide state. Records do
/// not survive a restart.
#[derive(Default)]
pub struct MemoryCustomerStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    customers: Vec<customer::Model>,
    next_id: i64,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with records; id assignment continues past the
    /// highest seeded id.
    pub fn with_seed(seed: Vec<customer::Model>) -> Self {
        let next_id = seed.iter().map(|c| c.id).max().unwrap_or(0);
        Self { inner: Mutex::new(Inner { customers: seed, next_id }) }
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn list(&self) -> Result<Vec<customer::Model>, ServiceError> {
        Ok(self.inner.lock().unwrap().customers.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<customer::Model>, ServiceError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, new: NewCustomer) -> Result<customer::Model, ServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let record = customer::Model {
            id: inner.next_id,
            name: new.name,
            email: new.email,
            age: new.age,
        };
        inner.customers.push(record.clone());
        Ok(record)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.customers.iter().any(|c| c.email == email))
    }

    async fn delete(&self, customer: &customer::Model) -> Result<(), ServiceError> {
        let mut inner = self.inner.lock().unwrap();
        inner.customers.retain(|c| c.id != customer.id);
        Ok(())
    }

    async fn update(&self, customer: customer::Model) -> Result<customer::Model, ServiceError> {
        // Replace in place, keyed by id; the record count never changes here.
        let mut inner = self.inner.lock().unwrap();
        match inner.customers.iter_mut().find(|c| c.id == customer.id) {
            Some(slot) => {
                *slot = customer.clone();
                Ok(customer)
            }
            None => Err(ServiceError::NotFound(customer.id)),
        }
    }
}
