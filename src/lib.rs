//! `fan-select` library crate.
//!
//! The binary (`fansel`) is a thin wrapper around this library so that:
//!
//! - the selection engine is testable without spawning processes
//! - the engine can be embedded behind other front-ends (HTTP, batch jobs)
//!
//! Engine entry point: [`select::select_fans`].

pub mod app;
pub mod catalog;
pub mod chart;
pub mod cli;
pub mod config;
pub mod curve;
pub mod data;
pub mod domain;
pub mod drive;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod select;

pub use select::{SelectOptions, SelectionReport, select_fans, select_fans_with_diagnostics};
