//! # cc-server
//!
//! The catalog's HTTP surface: a searchable coin listing, refresh
//! trigger/status, price resolution and the lend-position pass-through.
//!
//! The framework layer stays thin; all domain behavior lives in
//! `cc-catalog` and the route handlers only translate between HTTP and the
//! domain error taxonomy.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use server::start_server;
pub use state::AppState;
