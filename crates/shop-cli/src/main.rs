//! # shop
//!
//! Menu-driven store front.
//!
//! ## Usage
//!
//! ```bash
//! # Optional settings
//! export SHOP_CATALOG=config/products.toml
//! export SHOP_RECEIPT_FORMAT=json
//!
//! # Run the menu (logs go to stderr)
//! RUST_LOG=info shop
//! ```

use shop_cli::{AppState, Menu};
use std::io;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new()?;

    info!(
        "Products loaded: {}",
        state.store.with_store(|store| store.len())?
    );
    info!("Receipt format: {:?}", state.config.receipt_format);

    let stdin = io::stdin();
    Menu::new(
        state.store.clone(),
        state.config.receipt_format,
        stdin.lock(),
        io::stdout(),
    )
    .run()
}

fn print_banner() {
    println!(
        r#"
  Shop RS
  ━━━━━━━━━━━━━━━━━━━━━━━
  Inventory & promotions
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
