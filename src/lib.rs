//! Flightdeck - Pilot Career Platform Backend
//!
//! This crate implements plan-based feature gating for the pilot logbook,
//! route builder, and resume tooling, with a trial-aware subscription
//! lifecycle.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
