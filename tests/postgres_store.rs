//! Runs against a real PostgreSQL when `TEST_DATABASE_URL` is set; otherwise each test returns early.

use customer_api::{Customer, CustomerContext, CustomerStore, PgCustomerStore, Settings, StoreError};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

async fn test_store(label: &str) -> Option<Arc<PgCustomerStore>> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let settings = Settings {
        database_url: url,
        table: format!("customers_test_{}_{}_{}", label, std::process::id(), unique),
        max_connections: 2,
        ..Settings::default()
    };
    Some(Arc::new(PgCustomerStore::connect(&settings).await.unwrap()))
}

async fn drop_table(store: &PgCustomerStore) {
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", store.table_name()))
        .execute(store.pool())
        .await
        .unwrap();
}

#[tokio::test]
async fn round_trip_through_context() {
    let Some(store) = test_store("round_trip").await else {
        return;
    };
    let mut ctx = CustomerContext::new(store.clone());
    assert!(ctx.list_all().await.unwrap().is_empty());

    ctx.add(Customer::new(1, "Yuki", "yuki@gmail.com", "(61)99999-9999"));
    ctx.add(Customer::new(2, "Ana", "", ""));
    ctx.save().await.unwrap();

    let found = ctx.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(found, Customer::new(1, "Yuki", "yuki@gmail.com", "(61)99999-9999"));

    ctx.update(Customer::new(1, "Yuki2", "", ""));
    ctx.save().await.unwrap();
    let ids: Vec<i32> = ctx.list_all().await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);

    ctx.remove(&found);
    ctx.save().await.unwrap();
    assert!(ctx.find_by_id(1).await.unwrap().is_none());

    drop_table(&store).await;
}

#[tokio::test]
async fn duplicate_id_rolls_back_whole_batch() {
    let Some(store) = test_store("duplicate").await else {
        return;
    };
    let mut ctx = CustomerContext::new(store.clone());
    ctx.add(Customer::new(1, "a", "", ""));
    ctx.save().await.unwrap();

    ctx.add(Customer::new(2, "b", "", ""));
    ctx.add(Customer::new(1, "dup", "", ""));
    let err = ctx.save().await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(1)));

    let all = store.list_all().await.unwrap();
    assert_eq!(all, vec![Customer::new(1, "a", "", "")]);

    drop_table(&store).await;
}

#[tokio::test]
async fn vanished_row_aborts_commit() {
    let Some(store) = test_store("vanished").await else {
        return;
    };
    let mut ctx = CustomerContext::new(store.clone());
    ctx.update(Customer::new(99, "ghost", "", ""));
    let err = ctx.save().await.unwrap_err();
    assert!(matches!(err, StoreError::Missing(99)));
    store.ping().await.unwrap();

    drop_table(&store).await;
}

#[tokio::test]
async fn existing_table_without_position_is_upgraded() {
    let Some(store) = test_store("legacy_host").await else {
        return;
    };
    let legacy_name = format!("customers_legacy_{}", std::process::id());
    sqlx::query(&format!(
        "CREATE TABLE \"public\".\"{}\" (id INTEGER PRIMARY KEY, name TEXT NOT NULL DEFAULT '', email TEXT NOT NULL DEFAULT '', phone TEXT NOT NULL DEFAULT '')",
        legacy_name
    ))
    .execute(store.pool())
    .await
    .unwrap();

    let legacy = Arc::new(PgCustomerStore::new(store.pool().clone(), "public", &legacy_name));
    legacy.ensure_table().await.unwrap();

    let mut ctx = CustomerContext::new(legacy.clone());
    ctx.add(Customer::new(3, "c", "", ""));
    ctx.add(Customer::new(1, "a", "", ""));
    ctx.save().await.unwrap();
    let ids: Vec<i32> = legacy.list_all().await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 1]);

    drop_table(&legacy).await;
    drop_table(&store).await;
}
