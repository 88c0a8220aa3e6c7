use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{EarnRule, RuleConfigError, RuleError, RuleIdentity};
use crate::earnings::domain::{Airport, CalculationResult, EarningsRecord, Segment};
use crate::earnings::geo::Geography;

pub type EarningsTable = BTreeMap<String, EarningsRecord>;

/// Ways a location can be named in a geographical rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Airport,
    City,
    Country,
    Region,
}

impl LocationKind {
    /// Match priority, most specific first.
    pub const PRIORITY: [LocationKind; 4] = [
        LocationKind::Airport,
        LocationKind::City,
        LocationKind::Country,
        LocationKind::Region,
    ];

    fn normalize(self, value: &str) -> String {
        match self {
            LocationKind::Region => value.trim().to_string(),
            _ => value.trim().to_lowercase(),
        }
    }
}

/// A configured location that an airport satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationMatch {
    pub kind: LocationKind,
    pub value: String,
}

impl LocationMatch {
    pub fn render(&self, geo: &dyn Geography) -> String {
        match self.kind {
            LocationKind::Airport => format!("{} airport", self.value),
            LocationKind::City | LocationKind::Country => self.value.clone(),
            LocationKind::Region => geo
                .region_display(&self.value)
                .unwrap_or(&self.value)
                .to_string(),
        }
    }
}

/// Origin side: plain membership lists per location kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OriginConfig {
    #[serde(default)]
    pub airport: Vec<String>,
    #[serde(default)]
    pub city: Vec<String>,
    #[serde(default)]
    pub country: Vec<String>,
    #[serde(default)]
    pub region: Vec<String>,
}

impl OriginConfig {
    fn into_entries(self) -> Vec<(LocationKind, String, ())> {
        [
            (LocationKind::Airport, self.airport),
            (LocationKind::City, self.city),
            (LocationKind::Country, self.country),
            (LocationKind::Region, self.region),
        ]
        .into_iter()
        .flat_map(|(kind, values)| values.into_iter().map(move |value| (kind, value, ())))
        .collect()
    }
}

/// Destination side: per location kind, a table from location to payload.
///
/// Tables keep declaration order, which decides between overlapping regions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig<T> {
    #[serde(default = "IndexMap::new")]
    pub airport: IndexMap<String, T>,
    #[serde(default = "IndexMap::new")]
    pub city: IndexMap<String, T>,
    #[serde(default = "IndexMap::new")]
    pub country: IndexMap<String, T>,
    #[serde(default = "IndexMap::new")]
    pub region: IndexMap<String, T>,
}

impl<T> Default for DestinationConfig<T> {
    fn default() -> Self {
        Self {
            airport: IndexMap::new(),
            city: IndexMap::new(),
            country: IndexMap::new(),
            region: IndexMap::new(),
        }
    }
}

impl<T> DestinationConfig<T> {
    /// Convert every payload, stopping at the first failure.
    pub fn try_map<U, E, F>(self, mut convert: F) -> Result<DestinationConfig<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let mut map_table = |table: IndexMap<String, T>| -> Result<IndexMap<String, U>, E> {
            table
                .into_iter()
                .map(|(key, payload)| convert(payload).map(|converted| (key, converted)))
                .collect()
        };

        Ok(DestinationConfig {
            airport: map_table(self.airport)?,
            city: map_table(self.city)?,
            country: map_table(self.country)?,
            region: map_table(self.region)?,
        })
    }

    fn into_entries(self) -> Vec<(LocationKind, String, T)> {
        [
            (LocationKind::Airport, self.airport),
            (LocationKind::City, self.city),
            (LocationKind::Country, self.country),
            (LocationKind::Region, self.region),
        ]
        .into_iter()
        .flat_map(|(kind, table)| {
            table
                .into_iter()
                .map(move |(value, payload)| (kind, value, payload))
        })
        .collect()
    }
}

#[derive(Debug, Clone)]
struct LocationEntry<T> {
    value: String,
    payload: T,
}

/// Named locations grouped by kind, each carrying a payload.
///
/// Origins use `()` as the payload, destinations carry their earnings table.
/// Within a kind, entries are tried in the order they were configured.
#[derive(Debug, Clone)]
pub struct LocationIndex<T> {
    kinds: BTreeMap<LocationKind, IndexMap<String, LocationEntry<T>>>,
}

impl<T> LocationIndex<T> {
    fn from_entries(entries: Vec<(LocationKind, String, T)>) -> Self {
        let mut kinds: BTreeMap<LocationKind, IndexMap<String, LocationEntry<T>>> =
            BTreeMap::new();
        for (kind, value, payload) in entries {
            let key = kind.normalize(&value);
            if key.is_empty() {
                continue;
            }
            kinds.entry(kind).or_default().entry(key).or_insert(LocationEntry {
                value: value.trim().to_string(),
                payload,
            });
        }
        Self { kinds }
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.values().all(IndexMap::is_empty)
    }

    /// Highest priority configured location the airport falls within.
    pub fn find(&self, geo: &dyn Geography, airport: &Airport) -> Option<(LocationMatch, &T)> {
        LocationKind::PRIORITY.iter().find_map(|&kind| {
            let table = self.kinds.get(&kind)?;
            let entry = match kind {
                LocationKind::Airport => table.get(&kind.normalize(&airport.iata)),
                LocationKind::City => table.get(&kind.normalize(&airport.city)),
                LocationKind::Country => table.get(&kind.normalize(&airport.country)),
                LocationKind::Region => {
                    let iata = airport.iata.trim().to_lowercase();
                    table
                        .values()
                        .find(|entry| geo.is_in_region(&iata, &entry.value))
                }
            }?;

            Some((
                LocationMatch {
                    kind,
                    value: entry.value.clone(),
                },
                &entry.payload,
            ))
        })
    }
}

struct Resolution<'a> {
    origin: LocationMatch,
    destination: LocationMatch,
    earnings: &'a EarningsTable,
}

/// Rule earning by origin/destination pairing, in either direction.
#[derive(Debug, Clone)]
pub struct GeographicalRule {
    identity: RuleIdentity,
    origin: LocationIndex<()>,
    destination: LocationIndex<EarningsTable>,
}

impl GeographicalRule {
    pub fn new(
        identity: RuleIdentity,
        origin: OriginConfig,
        destination: DestinationConfig<EarningsTable>,
    ) -> Result<Self, RuleConfigError> {
        let origin = LocationIndex::from_entries(origin.into_entries());
        if origin.is_empty() {
            return Err(RuleConfigError::NoLocations {
                rule: identity.name().to_string(),
                side: "origin",
            });
        }

        let destination = LocationIndex::from_entries(destination.into_entries());
        if destination.is_empty() {
            return Err(RuleConfigError::NoLocations {
                rule: identity.name().to_string(),
                side: "destination",
            });
        }

        Ok(Self {
            identity,
            origin,
            destination,
        })
    }

    pub fn match_origin(&self, geo: &dyn Geography, airport: &Airport) -> Option<LocationMatch> {
        self.origin.find(geo, airport).map(|(matched, _)| matched)
    }

    pub fn match_destination(
        &self,
        geo: &dyn Geography,
        airport: &Airport,
    ) -> Option<LocationMatch> {
        self.destination.find(geo, airport).map(|(matched, _)| matched)
    }

    /// Origin and destination for the segment, trying the reverse direction
    /// when the segment is flown against the configured direction.
    pub fn origin_and_destination(
        &self,
        geo: &dyn Geography,
        segment: &Segment,
    ) -> Option<(LocationMatch, LocationMatch)> {
        self.resolve(geo, segment)
            .map(|resolution| (resolution.origin, resolution.destination))
    }

    fn resolve(&self, geo: &dyn Geography, segment: &Segment) -> Option<Resolution<'_>> {
        self.resolve_directed(geo, &segment.from_airport, &segment.to_airport)
            .or_else(|| {
                let reversed =
                    self.resolve_directed(geo, &segment.to_airport, &segment.from_airport);
                if reversed.is_some() {
                    debug!(rule = self.name(), "segment matched in reverse direction");
                }
                reversed
            })
    }

    fn resolve_directed<'a>(
        &'a self,
        geo: &dyn Geography,
        origin: &Airport,
        destination: &Airport,
    ) -> Option<Resolution<'a>> {
        let (origin, _) = self.origin.find(geo, origin)?;
        let (destination, earnings) = self.destination.find(geo, destination)?;
        Some(Resolution {
            origin,
            destination,
            earnings,
        })
    }
}

impl EarnRule for GeographicalRule {
    fn name(&self) -> &str {
        self.identity.name()
    }

    fn rule_url(&self) -> &str {
        self.identity.url()
    }

    fn applies(&self, geo: &dyn Geography, segment: &Segment, fare_earn_category: &str) -> bool {
        self.resolve(geo, segment)
            .map(|resolution| resolution.earnings.contains_key(fare_earn_category))
            .unwrap_or(false)
    }

    fn calculate(
        &self,
        geo: &dyn Geography,
        segment: &Segment,
        fare_earn_category: &str,
    ) -> Result<CalculationResult, RuleError> {
        let resolution = self.resolve(geo, segment).ok_or_else(|| {
            warn!(rule = self.name(), "calculate called for an unmatched segment");
            RuleError::UnmatchedSegment {
                rule: self.name().to_string(),
                from: segment.from_airport.iata.clone(),
                to: segment.to_airport.iata.clone(),
            }
        })?;

        let earnings = resolution
            .earnings
            .get(fare_earn_category)
            .copied()
            .ok_or_else(|| self.identity.category_not_earned(fare_earn_category))?;

        let notes = format!(
            "{} to {}",
            resolution.origin.render(geo),
            resolution.destination.render(geo)
        );

        Ok(self.identity.result(fare_earn_category, notes, earnings))
    }
}
