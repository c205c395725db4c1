//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use gomarket_cart::{CartContext, CartStore};
use gomarket_storage::{FileStore, MemoryStore};
use tracing::debug;

use crate::config::{CliConfig, StorageBackend};
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["gomarket.toml", ".gomarket.toml", "gomarket.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Open the configured backend and load the cart into a fresh scope.
    pub async fn open_cart(&self) -> Result<CartContext> {
        let cart_config = &self.config.cart;
        debug!(
            backend = ?self.config.storage.backend,
            key = %cart_config.storage_key(),
            "opening cart"
        );
        let cart = match self.config.storage.backend {
            StorageBackend::File => {
                let root = self.resolve_path(&self.config.storage.path);
                self.output
                    .debug(&format!("Using file store at {}", root.display()));
                let store = FileStore::open(&root)
                    .with_context(|| format!("Failed to open store at {}", root.display()))?;
                CartStore::open(store, cart_config).await?
            }
            StorageBackend::Memory => {
                self.output.debug("Using in-memory store");
                CartStore::open(MemoryStore::new(), cart_config).await?
            }
        };

        Ok(CartContext::new(cart))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in the directory tree above `start`.
fn find_config(start: &Path) -> Option<CliConfig> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                    return Some(config);
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config: CliConfig) -> Context {
        Context {
            config,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("gomarket.toml"),
            "[storage]\nbackend = \"memory\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = find_config(&nested).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_resolve_path() {
        let ctx = context_in(Path::new("/work"), CliConfig::default());
        assert_eq!(ctx.resolve_path("carts"), PathBuf::from("/work/carts"));
        assert_eq!(ctx.resolve_path("/abs"), PathBuf::from("/abs"));
    }

    #[tokio::test]
    async fn test_file_cart_persists_between_contexts() {
        let dir = tempfile::tempdir().unwrap();

        let ctx = context_in(dir.path(), CliConfig::default());
        let scope = ctx.open_cart().await.unwrap();
        let cart = scope.cart().unwrap();
        cart.add_to_cart(gomarket_cart::ProductDescriptor::new("A", "T", "u", 10.0));
        cart.flush().await;

        let ctx = context_in(dir.path(), CliConfig::default());
        let scope = ctx.open_cart().await.unwrap();
        assert_eq!(scope.use_cart().item_count(), 1);
        assert!(dir
            .path()
            .join(".gomarket")
            .join("%40GoMarket%3Aproducts.json")
            .exists());
    }
}
