//! LabOdc dashboard client library.
//!
//! Client-side runtime for the LabOdc multi-role dashboard: persistent
//! session storage, an authenticated HTTP pipeline with transparent token
//! refresh, and typed wrappers for the auth endpoints. Navigation
//! resolution lives in the companion `labodc-nav` crate.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod store;
