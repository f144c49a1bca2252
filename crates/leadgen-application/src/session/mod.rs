//! Session lifecycle services.
//!
//! [`SessionStore`] is the single owner of the authentication state. Views
//! and the router observe it through [`SessionStore::subscribe`].

mod store;

pub use store::{LOGIN_FAILED_MESSAGE, NO_TOKEN_MESSAGE, SessionStore};
