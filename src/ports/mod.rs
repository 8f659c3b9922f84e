//! Port traits for the configuration and catalog boundary.

pub mod config_port;
pub mod catalog_port;
