//! Segment earning rules: how many points and status credits a flight
//! segment earns for a fare-earn category, and why.
//!
//! Rules are built once from typed configuration (or a JSON rule set) and are
//! immutable afterwards, so a [`RuleSet`](earnings::RuleSet) can be shared
//! across threads behind an `Arc`. Distance and region lookups are supplied by
//! the host through the [`Geography`](earnings::Geography) trait.

pub mod config;
pub mod earnings;
pub mod error;
pub mod telemetry;
