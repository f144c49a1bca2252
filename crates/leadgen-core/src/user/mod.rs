//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User profile domain model
//! - `id`: Server-assigned identifiers
//!
//! # Usage
//!
//! ```ignore
//! use leadgen_core::user::{UserProfile, RecordId};
//! ```

mod id;
mod model;

// Re-export public API
pub use id::RecordId;
pub use model::UserProfile;
