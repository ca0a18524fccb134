//! Client for the host media server's REST API.
//!
//! [`api::HostApi`] wraps the handful of host endpoints this service calls;
//! [`catalog::HostCatalog`] exposes them through the core
//! [`Catalog`](genrerows_core::catalog::Catalog) trait.

pub mod api;
pub mod catalog;

pub use api::{HostApi, HostApiError};
pub use catalog::HostCatalog;
