//! # Application State
//!
//! The shared store plus the configuration it was built from.

use crate::config::AppConfig;
use anyhow::Context;
use shop_core::{Catalog, SharedStore, Store, StoreOptions};
use std::path::Path;

/// Catalog compiled into the binary, used when no file is found
const BUILTIN_CATALOG: &str = include_str!("../../../config/products.toml");

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The store, behind a lock
    pub store: SharedStore,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state from the environment
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(AppConfig::from_env())
    }

    /// Create state from an explicit configuration
    pub fn with_config(config: AppConfig) -> anyhow::Result<Self> {
        let store = load_store(&config)?;
        Ok(Self {
            store: SharedStore::new(store),
            config,
        })
    }
}

/// Build the store from the configured catalog
pub fn load_store(config: &AppConfig) -> anyhow::Result<Store> {
    let options = StoreOptions {
        list_non_stocked: config.list_non_stocked,
    };

    if let Some(path) = &config.catalog_path {
        return load_catalog_file(path, options);
    }

    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        let path = Path::new(path);
        if path.is_file() {
            return load_catalog_file(path, options);
        }
    }

    tracing::warn!("No product catalog found, using built-in catalog");
    let store = Catalog::from_toml(BUILTIN_CATALOG)?.into_store(options)?;
    Ok(store)
}

fn load_catalog_file(path: &Path, options: StoreOptions) -> anyhow::Result<Store> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let store = Catalog::from_toml(&content)
        .and_then(|catalog| catalog.into_store(options))
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    tracing::info!("Loaded {} products from {}", store.len(), path.display());
    Ok(store)
}
