//! HTTP adapter for the Lead Generation REST API.
//!
//! [`ApiClient`] implements [`leadgen_core::api::LeadApi`] on top of
//! `reqwest`: it attaches the bearer token, bounds every request with a
//! timeout, parses each endpoint's response schema, and forwards 401
//! responses to the registered [`UnauthorizedHandler`].
//!
//! [`UnauthorizedHandler`]: leadgen_core::api::UnauthorizedHandler

mod client;
mod endpoints;
mod schema;

pub use client::ApiClient;
