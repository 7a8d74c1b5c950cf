//! Entitlement domain module.
//!
//! The policy core deciding, for a given user and a given protected
//! capability, whether access is granted right now.
//!
//! # Module Structure
//!
//! - `plan` - Plan tier taxonomy and slug resolution
//! - `feature` - Gateable capability taxonomy and per-feature rules
//! - `snapshot` - SubscriptionSnapshot and storage-record normalization
//! - `evaluator` - Pure access-decision functions
//! - `session` - Per-session state machine and gate states
//! - `errors` - EntitlementError

mod errors;
mod evaluator;
mod feature;
mod plan;
mod session;
mod snapshot;

pub use errors::EntitlementError;
pub use evaluator::{decide, effective_plan, in_trial, AccessDecision};
pub use feature::Feature;
pub use plan::Plan;
pub use session::{FetchTicket, GateState, SessionPhase, SubscriptionSession};
pub use snapshot::{RawSubscriptionRecord, SubscriptionSnapshot, TrialWindow};
