use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use models::customer;

use super::CustomerStore;
use crate::customer::domain::NewCustomer;
use crate::errors::ServiceError;

/// ORM-backed store built on the SeaORM entity for `customer`.
pub struct OrmCustomerStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CustomerStore for OrmCustomerStore {
    async fn list(&self) -> Result<Vec<customer::Model>, ServiceError> {
        customer::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<customer::Model>, ServiceError> {
        customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, new: NewCustomer) -> Result<customer::Model, ServiceError> {
        let created = customer::create(&self.db, &new.name, &new.email, new.age).await?;
        Ok(created)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let count = customer::Entity::find()
            .filter(customer::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(count != 0)
    }

    async fn delete(&self, customer: &customer::Model) -> Result<(), ServiceError> {
        customer::hard_delete(&self.db, customer.id).await?;
        Ok(())
    }

    async fn update(&self, customer: customer::Model) -> Result<customer::Model, ServiceError> {
        let mut am: customer::ActiveModel = customer::Entity::find_by_id(customer.id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or(ServiceError::NotFound(customer.id))?
            .into();
        am.name = Set(customer.name);
        am.email = Set(customer.email);
        am.age = Set(customer.age);
        am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }
}
