use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::customer;

use super::domain::{NewCustomer, RegistrationRequest, UpdateRequest};
use super::store::CustomerStore;
use crate::errors::ServiceError;

/// Business service enforcing uniqueness and existence rules on top of a
/// `CustomerStore` backend. `?Sized` admits `Arc<dyn CustomerStore>`.
pub struct CustomerService<S: CustomerStore + ?Sized> {
    store: Arc<S>,
}

impl<S: CustomerStore + ?Sized> CustomerService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<customer::Model>, ServiceError> {
        self.store.list().await
    }

    pub async fn get(&self, id: i64) -> Result<customer::Model, ServiceError> {
        self.store.find_by_id(id).await?.ok_or(ServiceError::NotFound(id))
    }

    /// Register a new customer, rejecting emails that are already taken.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::customer::domain::RegistrationRequest;
    /// use service::customer::service::CustomerService;
    /// use service::customer::store::memory::MemoryCustomerStore;
    /// let svc = CustomerService::new(Arc::new(MemoryCustomerStore::new()));
    /// let created = tokio_test::block_on(svc.register(RegistrationRequest {
    ///     name: "Alex".into(),
    ///     email: "alex@test.com".into(),
    ///     age: 21,
    /// }))
    /// .unwrap();
    /// assert!(created.id > 0);
    /// assert_eq!(created.email, "alex@test.com");
    /// ```
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<customer::Model, ServiceError> {
        customer::validate_name(&request.name)?;
        customer::validate_email(&request.email)?;
        customer::validate_age(request.age)?;

        if self.store.exists_by_email(&request.email).await? {
            debug!("email taken: {}", request.email);
            return Err(ServiceError::DuplicateEmail(request.email));
        }
        let created = self.store.insert(NewCustomer::from(request)).await?;
        info!(id = created.id, "customer_registered");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        self.store.delete(&existing).await?;
        info!(id, "customer_deleted");
        Ok(())
    }

    /// Overwrite an existing customer's name, email and age unconditionally.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn update(
        &self,
        id: i64,
        request: UpdateRequest,
    ) -> Result<customer::Model, ServiceError> {
        customer::validate_name(&request.name)?;
        customer::validate_email(&request.email)?;
        customer::validate_age(request.age)?;

        let mut existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        existing.name = request.name;
        existing.email = request.email;
        existing.age = request.age;
        let updated = self.store.update(existing).await?;
        info!(id, "customer_updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::store::memory::MemoryCustomerStore;

    fn service() -> CustomerService<MemoryCustomerStore> {
        CustomerService::new(Arc::new(MemoryCustomerStore::new()))
    }

    fn registration(name: &str, email: &str, age: i32) -> RegistrationRequest {
        RegistrationRequest { name: name.into(), email: email.into(), age }
    }

    #[tokio::test]
    async fn register_then_get_round_trips() {
        let svc = service();
        let created = svc.register(registration("Alex", "alex@test.com", 21)).await.unwrap();
        assert!(created.id > 0);

        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched.name, "Alex");
        assert_eq!(fetched.email, "alex@test.com");
        assert_eq!(fetched.age, 21);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_insert() {
        let svc = service();
        svc.register(registration("Alex", "alex@test.com", 21)).await.unwrap();

        let err = svc.register(registration("Other", "alex@test.com", 30)).await.unwrap_err();
        match err {
            ServiceError::DuplicateEmail(email) => assert_eq!(email, "alex@test.com"),
            other => panic!("expected DuplicateEmail, got {other}"),
        }
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_unknown_id_reports_not_found() {
        let svc = service();
        let err = svc.get(99).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(99)));
        assert_eq!(err.to_string(), "customer with id 99 not found");
    }

    #[tokio::test]
    async fn delete_unknown_id_mutates_nothing() {
        let svc = service();
        svc.register(registration("Alex", "alex@test.com", 21)).await.unwrap();

        let err = svc.delete(99).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(99)));
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_id_mutates_nothing() {
        let svc = service();
        let err = svc
            .update(99, UpdateRequest { name: "N".into(), email: "n@test.com".into(), age: 1 })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(99)));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_every_mutable_field() {
        let svc = service();
        let created = svc.register(registration("Alex", "alex@test.com", 21)).await.unwrap();

        let updated = svc
            .update(
                created.id,
                UpdateRequest { name: "Alexis".into(), email: "alexis@test.com".into(), age: 22 },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);

        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched.name, "Alexis");
        assert_eq!(fetched.email, "alexis@test.com");
        assert_eq!(fetched.age, 22);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let svc = service();
        let created = svc.register(registration("Alex", "alex@test.com", 21)).await.unwrap();
        svc.delete(created.id).await.unwrap();
        assert!(matches!(svc.get(created.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn register_validates_fields() {
        let svc = service();
        assert!(svc.register(registration("", "a@test.com", 21)).await.is_err());
        assert!(svc.register(registration("Alex", "not-an-email", 21)).await.is_err());
        assert!(svc.register(registration("Alex", "a@test.com", 0)).await.is_err());
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn registration_journey() {
        let svc = service();

        let created = svc.register(registration("Alex", "alex@test.com", 21)).await.unwrap();
        assert!(created.id > 0);

        let dup = svc.register(registration("Alex", "alex@test.com", 21)).await;
        assert!(matches!(dup, Err(ServiceError::DuplicateEmail(_))));
        assert_eq!(svc.list().await.unwrap().len(), 1);

        svc.update(
            created.id,
            UpdateRequest { name: "Alex".into(), email: "alex@test.com".into(), age: 22 },
        )
        .await
        .unwrap();
        assert_eq!(svc.get(created.id).await.unwrap().age, 22);

        svc.delete(created.id).await.unwrap();
        assert!(matches!(svc.get(created.id).await, Err(ServiceError::NotFound(_))));
    }
}
