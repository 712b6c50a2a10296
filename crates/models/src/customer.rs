use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), ModelError> {
    if age <= 0 {
        return Err(ModelError::Validation("age must be positive".into()));
    }
    Ok(())
}

/// Insert a customer; the database assigns the id.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    age: i32,
) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_age(age)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        age: Set(age),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
