use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EarnRule, RuleConfigError, RuleError, RuleIdentity};
use crate::earnings::domain::{CalculationResult, EarningsRecord, Segment};
use crate::earnings::geo::Geography;

/// Pre-authored earnings for one fare class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareClassEntry {
    pub qantas_points: u32,
    pub status_credits: u32,
    pub calculation_notes: String,
}

impl FareClassEntry {
    fn earnings(&self) -> EarningsRecord {
        EarningsRecord::new(self.qantas_points, self.status_credits)
    }
}

/// Flat per-fare-class earnings, independent of the segment flown.
#[derive(Debug, Clone)]
pub struct FareClassRule {
    identity: RuleIdentity,
    fare_classes: BTreeMap<String, FareClassEntry>,
}

impl FareClassRule {
    pub fn new(
        identity: RuleIdentity,
        fare_classes: BTreeMap<String, FareClassEntry>,
    ) -> Result<Self, RuleConfigError> {
        if fare_classes.is_empty() {
            return Err(RuleConfigError::EmptyFareClassTable {
                rule: identity.name().to_string(),
            });
        }

        Ok(Self {
            identity,
            fare_classes,
        })
    }
}

impl EarnRule for FareClassRule {
    fn name(&self) -> &str {
        self.identity.name()
    }

    fn rule_url(&self) -> &str {
        self.identity.url()
    }

    fn applies(&self, _geo: &dyn Geography, _segment: &Segment, fare_earn_category: &str) -> bool {
        self.fare_classes.contains_key(fare_earn_category)
    }

    fn calculate(
        &self,
        _geo: &dyn Geography,
        _segment: &Segment,
        fare_earn_category: &str,
    ) -> Result<CalculationResult, RuleError> {
        let entry = self
            .fare_classes
            .get(fare_earn_category)
            .ok_or_else(|| self.identity.category_not_earned(fare_earn_category))?;

        Ok(self.identity.result(
            fare_earn_category,
            entry.calculation_notes.clone(),
            entry.earnings(),
        ))
    }
}
