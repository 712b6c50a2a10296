use async_trait::async_trait;

use models::customer;

use super::domain::NewCustomer;
use crate::errors::ServiceError;

pub mod memory;
pub mod seaorm;
pub mod sql;

/// Storage contract for customer records.
///
/// All backends implement the same six operations with identical observable
/// semantics; they differ only in persistence mechanism. Absence is reported
/// as `Ok(None)`, never as an error.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn list(&self) -> Result<Vec<customer::Model>, ServiceError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<customer::Model>, ServiceError>;

    /// Persist a new record; the backend assigns the id and returns the
    /// stored row.
    async fn insert(&self, new: NewCustomer) -> Result<customer::Model, ServiceError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError>;

    /// Remove a record; deletion is keyed by id internally.
    async fn delete(&self, customer: &customer::Model) -> Result<(), ServiceError>;

    /// Overwrite the stored record with the given full, already-mutated one.
    async fn update(&self, customer: customer::Model) -> Result<customer::Model, ServiceError>;
}
