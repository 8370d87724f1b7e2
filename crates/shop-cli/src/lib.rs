//! # shop-cli
//!
//! Interactive front end for shop-rs.
//!
//! This crate provides:
//! - `AppConfig` read from the environment
//! - `AppState` holding the shared store loaded from the catalog
//! - `Menu`, the text menu loop
//!
//! ## Menu
//!
//! | Choice | Action |
//! |--------|--------|
//! | 1 | List available products |
//! | 2 | Show total stock quantity |
//! | 3 | Place an order (name/quantity pairs until `done`) |
//! | 4 | Quit |

pub mod config;
pub mod menu;
pub mod state;

pub use config::{AppConfig, ReceiptFormat};
pub use menu::Menu;
pub use state::AppState;
