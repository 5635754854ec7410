//! Capacity distribution planning for scaling groups.
//!
//! Given the current state of N scaling groups and a total desired
//! instance count, the planner computes one capacity update per group:
//! an equal split of the total, truncated by per-group capacity
//! ceilings, with a single top-up pass that spreads any truncated
//! shortfall across groups that still have headroom.
//!
//! # Invariants
//!
//! - Planning is pure and deterministic: no I/O, no clock, no logging.
//! - `plan.updates` preserves input group order, one entry per group.
//! - An update field left `None` means "do not change this attribute".
//! - Ties in the remainder distribution always favor the earliest
//!   groups in input order.
//!
//! A plan can fall short of the requested total when the combined
//! capacity ceilings are too low. That is a reported condition, not an
//! error: the planner always returns a plan, and
//! [`Plan::total_desired`] tells the caller what was actually
//! achievable.

mod model;
mod planner;

pub use model::{CapacityUpdate, GroupInfo, Plan};
pub use planner::{effective_cap, plan_equal_split, plan_zero};
