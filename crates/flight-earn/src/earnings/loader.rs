use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::definition::RuleSetDocument;
use super::domain::{Airport, Coordinates};
use super::geo::{RegionTable, RegionTableDocument};
use super::rules::{EarnRule, Rule, RuleConfigError};

/// Failures while reading rule, airport or region data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read earning data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid airport CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Rule(#[from] RuleConfigError),
}

/// Ordered, validated rules ready for evaluation.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fare_earn_categories: Vec<String>,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn from_document(document: RuleSetDocument) -> Result<Self, RuleConfigError> {
        let RuleSetDocument {
            fare_earn_categories,
            rules,
        } = document;

        let rules = rules
            .into_iter()
            .map(|definition| {
                debug!(rule = definition.name(), "building earn rule");
                definition.build(&fare_earn_categories)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fare_earn_categories,
            rules,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let document: RuleSetDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(document)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let document: RuleSetDocument = serde_json::from_reader(reader)?;
        Ok(Self::from_document(document)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path.as_ref())?;
        let rule_set = Self::from_reader(std::io::BufReader::new(file))?;
        info!(
            path = %path.as_ref().display(),
            rules = rule_set.len(),
            "loaded earning rules"
        );
        Ok(rule_set)
    }

    pub fn fare_earn_categories(&self) -> &[String] {
        &self.fare_earn_categories
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Airports keyed by upper-cased IATA code.
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    airports: BTreeMap<String, Airport>,
}

#[derive(Debug, Deserialize)]
struct AirportRow {
    #[serde(rename = "IATA")]
    iata: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

impl AirportDirectory {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut directory = Self::default();

        for record in csv_reader.deserialize::<AirportRow>() {
            let row = record?;
            directory.insert(Airport {
                iata: row.iata,
                city: row.city,
                country: row.country,
                coordinates: Coordinates {
                    latitude: row.latitude,
                    longitude: row.longitude,
                },
            });
        }

        Ok(directory)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path.as_ref())?;
        let directory = Self::from_reader(file)?;
        info!(
            path = %path.as_ref().display(),
            airports = directory.len(),
            "loaded airports"
        );
        Ok(directory)
    }

    fn insert(&mut self, airport: Airport) {
        let key = airport.iata.trim().to_ascii_uppercase();
        if self.airports.contains_key(&key) {
            debug!(iata = %key, "duplicate airport ignored");
            return;
        }
        self.airports.insert(key, airport);
    }

    pub fn get(&self, iata: &str) -> Option<&Airport> {
        self.airports.get(&iata.trim().to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

pub fn load_region_table<R: Read>(reader: R) -> Result<RegionTable, LoadError> {
    let document: RegionTableDocument = serde_json::from_reader(reader)?;
    Ok(RegionTable::from(document))
}

pub fn load_region_table_from_path<P: AsRef<Path>>(path: P) -> Result<RegionTable, LoadError> {
    let file = std::fs::File::open(path.as_ref())?;
    let table = load_region_table(std::io::BufReader::new(file))?;
    info!(
        path = %path.as_ref().display(),
        regions = table.len(),
        "loaded region table"
    );
    Ok(table)
}
