use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, Statement};

use models::customer;

use super::CustomerStore;
use crate::customer::domain::NewCustomer;
use crate::errors::ServiceError;

/// Direct-SQL backend issuing hand-written statements over the database
/// connection. Observably identical to the ORM variant.
pub struct SqlCustomerStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CustomerStore for SqlCustomerStore {
    async fn list(&self) -> Result<Vec<customer::Model>, ServiceError> {
        let stmt = Statement::from_string(
            DbBackend::Postgres,
            "SELECT id, name, email, age FROM customer",
        );
        customer::Entity::find()
            .from_raw_sql(stmt)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<customer::Model>, ServiceError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT id, name, email, age FROM customer WHERE id = $1",
            [id.into()],
        );
        customer::Entity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, new: NewCustomer) -> Result<customer::Model, ServiceError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "INSERT INTO customer (name, email, age) VALUES ($1, $2, $3) \
             RETURNING id, name, email, age",
            [new.name.into(), new.email.into(), new.age.into()],
        );
        customer::Entity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::Db("insert returned no row".into()))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) AS count FROM customer WHERE email = $1",
            [email.into()],
        );
        let row = self
            .db
            .query_one(stmt)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        let count: i64 = match row {
            Some(row) => row.try_get("", "count").map_err(|e| ServiceError::Db(e.to_string()))?,
            None => 0,
        };
        Ok(count != 0)
    }

    async fn delete(&self, customer: &customer::Model) -> Result<(), ServiceError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM customer WHERE id = $1",
            [customer.id.into()],
        );
        self.db
            .execute(stmt)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    async fn update(&self, customer: customer::Model) -> Result<customer::Model, ServiceError> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE customer SET name = $1, email = $2, age = $3 WHERE id = $4 \
             RETURNING id, name, email, age",
            [
                customer.name.into(),
                customer.email.into(),
                customer.age.into(),
                customer.id.into(),
            ],
        );
        customer::Entity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or(ServiceError::NotFound(customer.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn sql_store_honors_contract() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match test_support::get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };
        let store = SqlCustomerStore { db };
        test_support::exercise_store(&store).await
    }
}
