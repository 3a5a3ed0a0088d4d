//! Library entrypoint for bidwatch.
//!
//! The binary only wires things together; integration tests under `tests/`
//! import the monitor, services and router from here.

pub mod config;
pub mod error;
pub mod models;

pub mod services;

pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
}
