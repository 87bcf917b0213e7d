//! Data sources other than catalog files.

pub mod synthetic;

pub use synthetic::generate_catalog;
