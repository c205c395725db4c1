//! Cart configuration.

use gomarket_storage::storage_key;
use serde::{Deserialize, Serialize};

use crate::CartError;

/// Where the cart snapshot lives in the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Literal namespace prefix for the storage key.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Key name inside the namespace.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_namespace() -> String {
    "@GoMarket".to_string()
}

fn default_key() -> String {
    "products".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            key: default_key(),
        }
    }
}

impl CartConfig {
    /// Full storage key, e.g. `@GoMarket:products`.
    pub fn storage_key(&self) -> String {
        storage_key!(self.namespace.as_str(), self.key)
    }

    /// Reject configurations that would produce an ambiguous key.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.namespace.trim().is_empty() {
            return Err(CartError::InvalidConfig(
                "cart namespace must not be empty".to_string(),
            ));
        }
        if self.key.trim().is_empty() {
            return Err(CartError::InvalidConfig(
                "cart key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_storage_key() {
        assert_eq!(CartConfig::default().storage_key(), "@GoMarket:products");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CartConfig = serde_json::from_str(r#"{"key": "basket"}"#).unwrap();
        assert_eq!(config.namespace, "@GoMarket");
        assert_eq!(config.storage_key(), "@GoMarket:basket");
    }

    #[test]
    fn test_validate_rejects_empty_parts() {
        let config = CartConfig {
            namespace: " ".to_string(),
            ..CartConfig::default()
        };
        assert!(matches!(config.validate(), Err(CartError::InvalidConfig(_))));

        let config = CartConfig {
            key: String::new(),
            ..CartConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(CartConfig::default().validate().is_ok());
    }
}
