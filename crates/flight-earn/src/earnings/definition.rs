use std::collections::BTreeMap;

use serde::Deserialize;

use super::domain::EarningsRecord;
use super::rates::parse_earning_rates;
use super::rules::{
    DestinationConfig, DistanceBand, DistanceRule, EarningsTable, FareClassEntry, FareClassRule,
    GeographicalRule, IntraCountryRule, OriginConfig, Rule, RuleConfigError, RuleIdentity,
};

/// Serialized rule set: shared fare-earn categories plus ordered rules.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetDocument {
    #[serde(default)]
    pub fare_earn_categories: Vec<String>,
    pub rules: Vec<RuleDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleDefinition {
    Distance {
        name: String,
        #[serde(default)]
        url: String,
        bands: Vec<BandDefinition>,
    },
    IntraCountry {
        name: String,
        #[serde(default)]
        url: String,
        country: String,
        bands: Vec<BandDefinition>,
    },
    FareClass {
        name: String,
        #[serde(default)]
        url: String,
        fare_classes: BTreeMap<String, FareClassEntry>,
    },
    Geographical {
        name: String,
        #[serde(default)]
        url: String,
        origin: OriginConfig,
        destination: DestinationConfig<EarningsDefinition>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct BandDefinition {
    pub min_distance: f64,
    #[serde(default)]
    pub max_distance: Option<f64>,
    pub earnings: EarningsDefinition,
}

/// Earnings written either as raw rate strings or as an explicit table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EarningsDefinition {
    Rates { points: String, credits: String },
    Table(BTreeMap<String, EarningsRecord>),
}

impl EarningsDefinition {
    fn resolve(
        self,
        rule: &str,
        fare_earn_categories: &[String],
    ) -> Result<EarningsTable, RuleConfigError> {
        match self {
            EarningsDefinition::Table(table) => Ok(table),
            EarningsDefinition::Rates { points, credits } => {
                if fare_earn_categories.is_empty() {
                    return Err(RuleConfigError::MissingFareEarnCategories {
                        rule: rule.to_string(),
                    });
                }
                Ok(parse_earning_rates(&points, &credits, fare_earn_categories))
            }
        }
    }
}

impl RuleDefinition {
    pub fn name(&self) -> &str {
        match self {
            RuleDefinition::Distance { name, .. }
            | RuleDefinition::IntraCountry { name, .. }
            | RuleDefinition::FareClass { name, .. }
            | RuleDefinition::Geographical { name, .. } => name,
        }
    }

    /// Validate the definition and build the rule it describes.
    pub fn build(self, fare_earn_categories: &[String]) -> Result<Rule, RuleConfigError> {
        match self {
            RuleDefinition::Distance { name, url, bands } => {
                let bands = resolve_bands(&name, bands, fare_earn_categories)?;
                let rule = DistanceRule::new(RuleIdentity::new(name, url)?, bands)?;
                Ok(rule.into())
            }
            RuleDefinition::IntraCountry {
                name,
                url,
                country,
                bands,
            } => {
                let bands = resolve_bands(&name, bands, fare_earn_categories)?;
                let inner = DistanceRule::new(RuleIdentity::new(name, url)?, bands)?;
                Ok(IntraCountryRule::new(country, inner)?.into())
            }
            RuleDefinition::FareClass {
                name,
                url,
                fare_classes,
            } => Ok(FareClassRule::new(RuleIdentity::new(name, url)?, fare_classes)?.into()),
            RuleDefinition::Geographical {
                name,
                url,
                origin,
                destination,
            } => {
                let destination = destination
                    .try_map(|earnings| earnings.resolve(&name, fare_earn_categories))?;
                let rule =
                    GeographicalRule::new(RuleIdentity::new(name, url)?, origin, destination)?;
                Ok(rule.into())
            }
        }
    }
}

fn resolve_bands(
    rule: &str,
    bands: Vec<BandDefinition>,
    fare_earn_categories: &[String],
) -> Result<Vec<DistanceBand>, RuleConfigError> {
    bands
        .into_iter()
        .map(|band| {
            let earnings = band.earnings.resolve(rule, fare_earn_categories)?;
            Ok(DistanceBand::new(
                band.min_distance,
                band.max_distance,
                earnings,
            ))
        })
        .collect()
}
