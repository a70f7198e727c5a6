//! Runtime settings read from the environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;

/// Which backend holds the Customers table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[serde(alias = "postgresql")]
    Postgres,
    Memory,
}

/// Field names are the lower-cased environment variable names.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database_url: String,
    #[serde(rename = "customer_store")]
    pub store: StoreKind,
    #[serde(rename = "customers_schema")]
    pub schema: String,
    #[serde(rename = "customers_table")]
    pub table: String,
    #[serde(rename = "db_max_connections")]
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Answer missing customers with 404 instead of the legacy 400.
    pub strict_not_found: bool,
    pub body_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "postgres://localhost/customers".into(),
            store: StoreKind::Postgres,
            schema: "public".into(),
            table: "Customers".into(),
            max_connections: 5,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            strict_not_found: false,
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl Settings {
    /// Read settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(config::Environment::default())
    }

    /// Build settings from an explicit variable map; unset keys keep their defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let source: config::Map<String, String> = vars.into_iter().collect();
        Self::load(config::Environment::default().source(Some(source)))
    }

    fn load(env: config::Environment) -> Result<Self, ConfigError> {
        let settings: Settings = config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(invalid("DB_MAX_CONNECTIONS", "0"));
        }
        if self.body_limit_bytes == 0 {
            return Err(invalid("BODY_LIMIT_BYTES", "0"));
        }
        if self.schema.trim().is_empty() {
            return Err(invalid("CUSTOMERS_SCHEMA", &self.schema));
        }
        if self.table.trim().is_empty() {
            return Err(invalid("CUSTOMERS_TABLE", &self.table));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_vars(vars)
    }

    #[test]
    fn defaults_when_unset() {
        let s = from_pairs(&[]).unwrap();
        assert_eq!(s.store, StoreKind::Postgres);
        assert_eq!(s.table, "Customers");
        assert_eq!(s.schema, "public");
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.body_limit_bytes, 64 * 1024);
        assert!(!s.strict_not_found);
    }

    #[test]
    fn reads_overrides() {
        let s = from_pairs(&[
            ("DATABASE_URL", "postgres://db.internal/shop"),
            ("CUSTOMER_STORE", "memory"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("STRICT_NOT_FOUND", "true"),
            ("CUSTOMERS_TABLE", "clients"),
            ("BODY_LIMIT_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(s.database_url, "postgres://db.internal/shop");
        assert_eq!(s.store, StoreKind::Memory);
        assert_eq!(s.max_connections, 12);
        assert_eq!(s.bind_addr.to_string(), "127.0.0.1:8080");
        assert!(s.strict_not_found);
        assert_eq!(s.table, "clients");
        assert_eq!(s.body_limit_bytes, 1024);
    }

    #[test]
    fn rejects_unparseable_values() {
        assert!(matches!(from_pairs(&[("DB_MAX_CONNECTIONS", "many")]), Err(ConfigError::Load(_))));
        assert!(matches!(from_pairs(&[("CUSTOMER_STORE", "redis")]), Err(ConfigError::Load(_))));
        assert!(matches!(from_pairs(&[("STRICT_NOT_FOUND", "maybe")]), Err(ConfigError::Load(_))));
        assert!(matches!(from_pairs(&[("BIND_ADDR", "nowhere")]), Err(ConfigError::Load(_))));
    }

    #[test]
    fn rejects_zero_and_blank_values() {
        let err = from_pairs(&[("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. }));
        let err = from_pairs(&[("BODY_LIMIT_BYTES", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BODY_LIMIT_BYTES", .. }));
        let err = from_pairs(&[("CUSTOMERS_TABLE", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CUSTOMERS_TABLE", .. }));
    }
}
