//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `entitlement` - Plan/feature taxonomy, snapshot normalization, and
//!   the access-decision evaluator

pub mod entitlement;
pub mod foundation;
