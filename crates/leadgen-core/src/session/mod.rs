//! Client-held authentication state.
//!
//! - `model`: `Session` and its status state machine
//! - `credentials`: the durable token/user pair and its storage trait

mod credentials;
mod model;

pub use credentials::{CredentialStore, StoredCredentials};
pub use model::{Session, SessionStatus};
