use super::{DistanceRule, EarnRule, RuleConfigError, RuleError};
use crate::earnings::domain::{CalculationResult, Segment};
use crate::earnings::geo::Geography;

/// Distance rule restricted to segments flown entirely within one country.
#[derive(Debug, Clone)]
pub struct IntraCountryRule {
    country: String,
    country_key: String,
    inner: DistanceRule,
}

impl IntraCountryRule {
    pub fn new(country: impl Into<String>, inner: DistanceRule) -> Result<Self, RuleConfigError> {
        let country = country.into();
        let country_key = country.trim().to_lowercase();
        if country_key.is_empty() {
            return Err(RuleConfigError::EmptyCountry {
                rule: inner.name().to_string(),
            });
        }

        Ok(Self {
            country,
            country_key,
            inner,
        })
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn distance_rule(&self) -> &DistanceRule {
        &self.inner
    }

    fn within_country(&self, segment: &Segment) -> bool {
        segment.from_airport.country.to_lowercase() == self.country_key
            && segment.to_airport.country.to_lowercase() == self.country_key
    }
}

impl EarnRule for IntraCountryRule {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn rule_url(&self) -> &str {
        self.inner.rule_url()
    }

    fn applies(&self, geo: &dyn Geography, segment: &Segment, fare_earn_category: &str) -> bool {
        self.within_country(segment) && self.inner.applies(geo, segment, fare_earn_category)
    }

    // Country is not re-checked; callers gate on `applies`.
    fn calculate(
        &self,
        geo: &dyn Geography,
        segment: &Segment,
        fare_earn_category: &str,
    ) -> Result<CalculationResult, RuleError> {
        self.inner.calculate(geo, segment, fare_earn_category)
    }
}
