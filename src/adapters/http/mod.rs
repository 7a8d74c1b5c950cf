//! HTTP adapters (Axum handlers, DTOs, routes).

pub mod entitlement;
