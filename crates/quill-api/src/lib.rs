//! # quill-api
//!
//! Service layer and HTTP boundary for the quill note backend.
//!
//! The access-control and caching core lives in [`services`]; the axum
//! handlers in [`handlers`] translate its closed error set into transport
//! responses and supply the authenticated caller identity.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
