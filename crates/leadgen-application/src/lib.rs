//! Application layer for the Lead Generation client.
//!
//! This crate coordinates the domain types in `leadgen-core` with an API
//! adapter and a credential store:
//!
//! - [`session`]: the session store and its restore/verify/login/logout flows
//! - [`guard`]: the route guard deciding what a screen may show
//! - [`router`]: the current route and redirect handling
//! - [`views`]: per-screen controllers (dashboard, sellers, brands, QA)

pub mod guard;
pub mod router;
pub mod session;
pub mod views;

pub use guard::{GuardDecision, RouteGuard};
pub use router::Router;
pub use session::SessionStore;
