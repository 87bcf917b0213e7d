//! Input/output helpers.
//!
//! - requirement JSON files (`request`)
//! - result exports (JSON/CSV) (`export`)
//!
//! Catalog files are read by [`crate::catalog`].

pub mod export;
pub mod request;

pub use export::*;
pub use request::*;
