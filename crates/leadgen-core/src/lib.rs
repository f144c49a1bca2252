pub mod api;
pub mod config;
pub mod error;
pub mod navigation;
pub mod records;
pub mod session;
pub mod user;

// Re-export common error type
pub use error::{LeadgenError, Result};
