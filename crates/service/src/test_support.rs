#![cfg(test)]
//! Helpers for tests that exercise the database-backed stores.
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use crate::customer::domain::NewCustomer;
use crate::customer::store::CustomerStore;

// Run migrations only once across the test process.
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect().await?;
    MIGRATED
        .get_or_init(|| async {
            migration::Migrator::up(&db, None).await.expect("migrate up");
        })
        .await;
    Ok(db)
}

/// Drive the full storage contract against a live backend. Emails are
/// randomized so reruns against a shared database do not collide.
pub async fn exercise_store(store: &dyn CustomerStore) -> Result<(), anyhow::Error> {
    let email = format!("crud_{}@example.com", uuid::Uuid::new_v4());

    assert!(!store.exists_by_email(&email).await?);
    let created = store
        .insert(NewCustomer { name: "Store Test".into(), email: email.clone(), age: 41 })
        .await?;
    assert!(created.id > 0);
    assert_eq!(created.email, email);
    assert!(store.exists_by_email(&email).await?);

    let found = store.find_by_id(created.id).await?.expect("inserted row is readable");
    assert_eq!(found, created);
    assert!(store.list().await?.iter().any(|c| c.id == created.id));

    let mut mutated = found;
    mutated.name = "Store Test Renamed".into();
    mutated.age = 42;
    let updated = store.update(mutated).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Store Test Renamed");
    assert_eq!(updated.age, 42);

    store.delete(&updated).await?;
    assert!(store.find_by_id(created.id).await?.is_none());
    assert!(!store.exists_by_email(&email).await?);
    Ok(())
}
