//! Strictly Stakes - HTTP host for escrowed tic-tac-toe.
//!
//! Wraps a [`strictly_escrow::Registry`] in an axum router, loads the
//! escrow rules and opening balances from TOML, and ships a scripted demo.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod cli;
pub mod config;
pub mod demo;
pub mod server;

pub use api::{AppState, ApiError, router};
pub use config::ServerConfig;
pub use demo::DemoReport;
pub use server::serve;
