//! Concrete adapter implementations for ports.

pub mod builtin_catalog;
pub mod file_config_adapter;
pub mod json_catalog_adapter;
pub mod rows_csv;
