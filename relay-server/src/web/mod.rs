//! Web server module for the relay's HTTP surface.
//!
//! This module provides:
//! - The LINE webhook receiver
//! - A manual forward endpoint for testing user IDs
//! - Debug endpoints over the activity log
//! - Home, health and a static HTML console

pub mod error;
pub mod handlers;
pub mod router;

pub use error::AppError;
pub use handlers::{
    clear_data, get_data, health, home, line_webhook, not_found, test_form, test_user_id,
    AppState, ROUTES,
};
pub use router::create_router;
