//! # Application Configuration
//!
//! Settings for the `shop` binary, read from the environment (and `.env`).
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SHOP_CATALOG` | search `config/products.toml` | Catalog file to load |
//! | `SHOP_LIST_NON_STOCKED` | `true` | Show non-stocked products in the listing |
//! | `SHOP_RECEIPT_FORMAT` | `text` | `text` or `json` |

use std::path::PathBuf;
use std::str::FromStr;

/// How a committed order is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiptFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReceiptFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReceiptFormat::Text),
            "json" => Ok(ReceiptFormat::Json),
            other => Err(format!("unknown receipt format '{}'", other)),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Explicit catalog path
    pub catalog_path: Option<PathBuf>,
    /// Include non-stocked products when listing
    pub list_non_stocked: bool,
    /// Receipt rendering
    pub receipt_format: ReceiptFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let list_non_stocked = match var("SHOP_LIST_NON_STOCKED") {
            Some(value) => parse_flag(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Ignoring invalid SHOP_LIST_NON_STOCKED");
                true
            }),
            None => true,
        };

        let receipt_format = match var("SHOP_RECEIPT_FORMAT") {
            Some(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring SHOP_RECEIPT_FORMAT: {}", e);
                ReceiptFormat::Text
            }),
            None => ReceiptFormat::Text,
        };

        Self {
            catalog_path: var("SHOP_CATALOG")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            list_non_stocked,
            receipt_format,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
