//! dexview - creature catalog TUI built on tui-dispatch
//!
//! The library exposes every module so the binary and the integration tests
//! share one reducer, one effect executor, and one set of components.

pub mod action;
pub mod api;
pub mod artwork;
pub mod components;
pub mod config;
pub mod effect;
pub mod reducer;
pub mod repository;
pub mod state;
pub mod telemetry;
pub mod units;
