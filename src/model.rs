//! The Customer entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One customer record. `id` is chosen by the caller and never generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "name": "Yuki",
    "email": "yuki@gmail.com",
    "phone": "(61)99999-9999"
}))]
pub struct Customer {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl Customer {
    pub fn new(id: i32, name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Customer {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Copy the mutable fields from `other`; `id` is left untouched.
    pub fn overwrite_from(&mut self, other: &Customer) {
        self.name.clone_from(&other.name);
        self.email.clone_from(&other.email);
        self.phone.clone_from(&other.phone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_fields_default_to_empty() {
        let c: Customer = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(c, Customer::new(3, "", "", ""));
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(serde_json::from_str::<Customer>(r#"{"name": "Yuki"}"#).is_err());
    }

    #[test]
    fn overwrite_keeps_id() {
        let mut c = Customer::new(1, "Yuki", "yuki@gmail.com", "1");
        c.overwrite_from(&Customer::new(9, "Yuki2", "", "2"));
        assert_eq!(c, Customer::new(1, "Yuki2", "", "2"));
    }
}
