//! PostgreSQL backend: bootstrap DDL and Customers table queries.

use super::{Change, CustomerStore};
use crate::error::StoreError;
use crate::model::Customer;
use crate::settings::Settings;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgConnection, PgPool};
use std::str::FromStr;

const COLUMNS: &str = "id, name, email, phone";

pub struct PgCustomerStore {
    pool: PgPool,
    /// Schema-qualified, quoted table name (e.g. `"public"."Customers"`).
    table: String,
}

impl PgCustomerStore {
    pub fn new(pool: PgPool, schema: &str, table: &str) -> Self {
        PgCustomerStore {
            pool,
            table: format!("{}.{}", quoted(schema), quoted(table)),
        }
    }

    /// Create the database if needed, open a pool, and make sure the table exists.
    pub async fn connect(settings: &Settings) -> Result<Self, StoreError> {
        ensure_database_exists(&settings.database_url).await?;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.database_url)
            .await?;
        let store = PgCustomerStore::new(pool, &settings.schema, &settings.table);
        store.ensure_schema(&settings.schema).await?;
        store.ensure_table().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    async fn ensure_schema(&self, schema: &str) -> Result<(), StoreError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// `position` records insertion order and is never exposed.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL DEFAULT '',
                phone TEXT NOT NULL DEFAULT '',
                position BIGSERIAL NOT NULL
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        // Tables created before insertion order was tracked lack `position`.
        let alter_position = format!("ALTER TABLE {} ADD COLUMN IF NOT EXISTS position BIGSERIAL", self.table);
        sqlx::query(&alter_position).execute(&self.pool).await?;
        tracing::info!(table = %self.table, "customers table ready");
        Ok(())
    }

    async fn apply(&self, conn: &mut PgConnection, change: Change) -> Result<(), StoreError> {
        match change {
            Change::Add(c) => {
                let sql = format!("INSERT INTO {} ({}) VALUES ($1, $2, $3, $4)", self.table, COLUMNS);
                tracing::debug!(sql = %sql, id = c.id, "query (tx)");
                sqlx::query(&sql)
                    .bind(c.id)
                    .bind(&c.name)
                    .bind(&c.email)
                    .bind(&c.phone)
                    .execute(&mut *conn)
                    .await
                    .map_err(|e| insert_error(e, c.id))?;
            }
            Change::Update(c) => {
                let sql = format!(
                    "UPDATE {} SET name = $2, email = $3, phone = $4 WHERE id = $1",
                    self.table
                );
                tracing::debug!(sql = %sql, id = c.id, "query (tx)");
                let done = sqlx::query(&sql)
                    .bind(c.id)
                    .bind(&c.name)
                    .bind(&c.email)
                    .bind(&c.phone)
                    .execute(&mut *conn)
                    .await?;
                if done.rows_affected() == 0 {
                    return Err(StoreError::Missing(c.id));
                }
            }
            Change::Remove(id) => {
                let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
                tracing::debug!(sql = %sql, id, "query (tx)");
                let done = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
                if done.rows_affected() == 0 {
                    return Err(StoreError::Missing(id));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn list_all(&self) -> Result<Vec<Customer>, StoreError> {
        let sql = format!("SELECT {} FROM {} ORDER BY position", COLUMNS, self.table);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, self.table);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Runs the whole batch in one transaction; any failure rolls it back on drop.
    async fn commit(&self, changes: Vec<Change>) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for change in changes {
            self.apply(&mut *tx, change).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn insert_error(e: sqlx::Error, id: i32) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateId(id),
        _ => StoreError::Db(e),
    }
}

/// Create the database named in `database_url` if it does not exist yet.
/// Connects to the `postgres` maintenance database on the same server to do so.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let Some((admin_url, db_name)) = split_db_name(database_url) else {
        return Ok(());
    };
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)?;
    let mut conn: PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `postgres://host/db?opts` into (`postgres://host/postgres?opts`, `db`).
fn split_db_name(url: &str) -> Option<(String, String)> {
    let scheme_end = url.find("://")? + 3;
    let path_start = scheme_end + url[scheme_end..].find('/')? + 1;
    let rest = &url[path_start..];
    let (db_name, query) = match rest.split_once('?') {
        Some((db, q)) => (db, Some(q)),
        None => (rest, None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Some((admin_url, db_name.trim().to_string()))
}

/// Quote an identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
