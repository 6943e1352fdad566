//! LabOdc navigation core.
//!
//! Role-scoped navigation resolution for the LabOdc dashboard:
//! - role identifiers and default landing routes
//! - per-role menu trees flattened into navigable entries
//! - breadcrumb matching for the current location
//! - auth and role guards deciding whether a route may mount

pub mod breadcrumb;
pub mod guard;
pub mod menu;
pub mod role;
