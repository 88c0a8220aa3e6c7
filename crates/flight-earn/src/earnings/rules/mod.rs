//! Earning rules and the contract they share.
//!
//! Each rule answers two questions for a segment and fare-earn category:
//! whether it [`applies`](EarnRule::applies), and what the segment earns under
//! it ([`calculate`](EarnRule::calculate)). `calculate` is only meaningful when
//! `applies` returned `true` for the same arguments; anything else is reported
//! as a [`RuleError`] rather than a zero result.

mod distance;
mod fare_class;
mod geographical;
mod intra_country;

pub use distance::{BandTableError, DistanceBand, DistanceBandTable, DistanceRule};
pub use fare_class::{FareClassEntry, FareClassRule};
pub use geographical::{
    DestinationConfig, EarningsTable, GeographicalRule, LocationIndex, LocationKind,
    LocationMatch, OriginConfig,
};
pub use intra_country::IntraCountryRule;

use serde::Serialize;

use super::domain::{CalculationResult, EarningsRecord, Segment};
use super::geo::Geography;

/// Shared capability implemented by every rule variant.
pub trait EarnRule {
    fn name(&self) -> &str;

    fn rule_url(&self) -> &str;

    fn applies(&self, geo: &dyn Geography, segment: &Segment, fare_earn_category: &str) -> bool;

    fn calculate(
        &self,
        geo: &dyn Geography,
        segment: &Segment,
        fare_earn_category: &str,
    ) -> Result<CalculationResult, RuleError>;
}

/// Raised when `calculate` is invoked for inputs the rule does not cover.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("rule '{rule}' has no distance band covering {distance:.1} miles")]
    NoDistanceBand { rule: String, distance: f64 },
    #[error("rule '{rule}' does not earn for fare-earn category '{category}'")]
    CategoryNotEarned { rule: String, category: String },
    #[error("rule '{rule}' does not match segment {from} - {to}")]
    UnmatchedSegment {
        rule: String,
        from: String,
        to: String,
    },
}

/// Construction-time validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleConfigError {
    #[error("rule name must not be empty")]
    EmptyName,
    #[error("rule '{rule}' has an invalid distance band table: {source}")]
    Bands {
        rule: String,
        #[source]
        source: BandTableError,
    },
    #[error("rule '{rule}' must name a country")]
    EmptyCountry { rule: String },
    #[error("rule '{rule}' has no fare classes configured")]
    EmptyFareClassTable { rule: String },
    #[error("rule '{rule}' has no {side} locations configured")]
    NoLocations { rule: String, side: &'static str },
    #[error("rule '{rule}' uses rate strings but no fare-earn categories are declared")]
    MissingFareEarnCategories { rule: String },
}

/// Name and reference URL stamped onto every calculation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleIdentity {
    name: String,
    url: String,
}

impl RuleIdentity {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self, RuleConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RuleConfigError::EmptyName);
        }

        Ok(Self {
            name,
            url: url.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn result(
        &self,
        fare_earn_category: &str,
        notes: String,
        earnings: EarningsRecord,
    ) -> CalculationResult {
        CalculationResult {
            rule: self.name.clone(),
            rule_url: self.url.clone(),
            fare_earn_category: fare_earn_category.to_string(),
            notes,
            qantas_points: earnings.qantas_points,
            status_credits: earnings.status_credits,
        }
    }

    pub(crate) fn category_not_earned(&self, fare_earn_category: &str) -> RuleError {
        RuleError::CategoryNotEarned {
            rule: self.name.clone(),
            category: fare_earn_category.to_string(),
        }
    }
}

/// Closed set of rule variants.
#[derive(Debug, Clone)]
pub enum Rule {
    Distance(DistanceRule),
    IntraCountry(IntraCountryRule),
    FareClass(FareClassRule),
    Geographical(GeographicalRule),
}

impl Rule {
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Distance(_) => "distance",
            Rule::IntraCountry(_) => "intra_country",
            Rule::FareClass(_) => "fare_class",
            Rule::Geographical(_) => "geographical",
        }
    }

    fn as_earn_rule(&self) -> &dyn EarnRule {
        match self {
            Rule::Distance(rule) => rule,
            Rule::IntraCountry(rule) => rule,
            Rule::FareClass(rule) => rule,
            Rule::Geographical(rule) => rule,
        }
    }
}

impl EarnRule for Rule {
    fn name(&self) -> &str {
        self.as_earn_rule().name()
    }

    fn rule_url(&self) -> &str {
        self.as_earn_rule().rule_url()
    }

    fn applies(&self, geo: &dyn Geography, segment: &Segment, fare_earn_category: &str) -> bool {
        self.as_earn_rule()
            .applies(geo, segment, fare_earn_category)
    }

    fn calculate(
        &self,
        geo: &dyn Geography,
        segment: &Segment,
        fare_earn_category: &str,
    ) -> Result<CalculationResult, RuleError> {
        self.as_earn_rule()
            .calculate(geo, segment, fare_earn_category)
    }
}

impl From<DistanceRule> for Rule {
    fn from(rule: DistanceRule) -> Self {
        Rule::Distance(rule)
    }
}

impl From<IntraCountryRule> for Rule {
    fn from(rule: IntraCountryRule) -> Self {
        Rule::IntraCountry(rule)
    }
}

impl From<FareClassRule> for Rule {
    fn from(rule: FareClassRule) -> Self {
        Rule::FareClass(rule)
    }
}

impl From<GeographicalRule> for Rule {
    fn from(rule: GeographicalRule) -> Self {
        Rule::Geographical(rule)
    }
}
