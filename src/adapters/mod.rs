//! Adapters wiring the application ports to concrete infrastructure.

pub mod http;
pub mod postgres;
