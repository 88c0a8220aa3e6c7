//! Points and status-credit earning rules for individual flight segments.

mod definition;
pub mod domain;
pub mod geo;
mod loader;
mod rates;
pub mod rules;

#[cfg(test)]
mod tests;

pub use definition::{BandDefinition, EarningsDefinition, RuleDefinition, RuleSetDocument};
pub use domain::{Airport, CalculationResult, Coordinates, EarningsRecord, Segment};
pub use geo::{great_circle_miles, Geography, RegionTable, StaticGeography};
pub use loader::{
    load_region_table, load_region_table_from_path, AirportDirectory, LoadError, RuleSet,
};
pub use rates::parse_earning_rates;
pub use rules::{
    DistanceBand, DistanceRule, EarnRule, FareClassEntry, FareClassRule, GeographicalRule,
    IntraCountryRule, Rule, RuleConfigError, RuleError, RuleIdentity,
};
