//! Application command/query handlers, grouped by module.

pub mod entitlement;
