use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{EarnRule, RuleConfigError, RuleError, RuleIdentity};
use crate::earnings::domain::{CalculationResult, EarningsRecord, Segment};
use crate::earnings::geo::Geography;

/// Distance range `(min_distance, max_distance]` with its earnings per category.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBand {
    pub min_distance: f64,
    pub max_distance: Option<f64>,
    pub earnings: BTreeMap<String, EarningsRecord>,
}

impl DistanceBand {
    pub fn new(
        min_distance: f64,
        max_distance: Option<f64>,
        earnings: BTreeMap<String, EarningsRecord>,
    ) -> Self {
        Self {
            min_distance,
            max_distance,
            earnings,
        }
    }

    /// Exclusive lower bound, inclusive upper bound.
    pub fn contains(&self, distance: f64) -> bool {
        self.min_distance < distance
            && self
                .max_distance
                .map(|max| distance <= max)
                .unwrap_or(true)
    }

    pub fn label(&self) -> String {
        match self.max_distance {
            Some(max) => format!("{} - {}", self.min_distance, max),
            None => format!("{} and over", self.min_distance),
        }
    }

    fn overlaps(&self, other: &DistanceBand) -> bool {
        let self_max = self.max_distance.unwrap_or(f64::INFINITY);
        let other_max = other.max_distance.unwrap_or(f64::INFINITY);
        self.min_distance < other_max && other.min_distance < self_max
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BandTableError {
    #[error("at least one distance band is required")]
    Empty,
    #[error("band {index} has invalid bounds ({min} to {max:?})")]
    InvalidBounds {
        index: usize,
        min: f64,
        max: Option<f64>,
    },
    #[error("bands {first} and {second} overlap")]
    Overlap { first: usize, second: usize },
}

/// Ordered, non-overlapping distance bands.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBandTable {
    bands: Vec<DistanceBand>,
}

impl DistanceBandTable {
    pub fn new(bands: Vec<DistanceBand>) -> Result<Self, BandTableError> {
        if bands.is_empty() {
            return Err(BandTableError::Empty);
        }

        for (index, band) in bands.iter().enumerate() {
            let valid_min = band.min_distance.is_finite() && band.min_distance >= 0.0;
            let valid_max = band
                .max_distance
                .map(|max| max.is_finite() && max > band.min_distance)
                .unwrap_or(true);
            if !valid_min || !valid_max {
                return Err(BandTableError::InvalidBounds {
                    index,
                    min: band.min_distance,
                    max: band.max_distance,
                });
            }
        }

        for (first, band) in bands.iter().enumerate() {
            if let Some(offset) = bands[first + 1..]
                .iter()
                .position(|other| band.overlaps(other))
            {
                return Err(BandTableError::Overlap {
                    first,
                    second: first + 1 + offset,
                });
            }
        }

        Ok(Self { bands })
    }

    /// First band, in declaration order, covering `distance`.
    pub fn band_for(&self, distance: f64) -> Option<&DistanceBand> {
        self.bands.iter().find(|band| band.contains(distance))
    }

    pub fn bands(&self) -> &[DistanceBand] {
        &self.bands
    }
}

/// Rule earning by great-circle distance band.
#[derive(Debug, Clone)]
pub struct DistanceRule {
    identity: RuleIdentity,
    bands: DistanceBandTable,
}

impl DistanceRule {
    pub fn new(identity: RuleIdentity, bands: Vec<DistanceBand>) -> Result<Self, RuleConfigError> {
        let bands = DistanceBandTable::new(bands).map_err(|source| RuleConfigError::Bands {
            rule: identity.name().to_string(),
            source,
        })?;

        Ok(Self { identity, bands })
    }

    pub fn band_for(&self, distance: f64) -> Option<&DistanceBand> {
        self.bands.band_for(distance)
    }
}

impl EarnRule for DistanceRule {
    fn name(&self) -> &str {
        self.identity.name()
    }

    fn rule_url(&self) -> &str {
        self.identity.url()
    }

    fn applies(&self, geo: &dyn Geography, segment: &Segment, fare_earn_category: &str) -> bool {
        let distance = geo.distance_miles(&segment.from_airport, &segment.to_airport);
        match self.band_for(distance) {
            Some(band) => band.earnings.contains_key(fare_earn_category),
            None => {
                debug!(rule = self.name(), distance, "no distance band covers segment");
                false
            }
        }
    }

    fn calculate(
        &self,
        geo: &dyn Geography,
        segment: &Segment,
        fare_earn_category: &str,
    ) -> Result<CalculationResult, RuleError> {
        let distance = geo.distance_miles(&segment.from_airport, &segment.to_airport);
        let band = self.band_for(distance).ok_or_else(|| {
            warn!(rule = self.name(), distance, "calculate called without a band");
            RuleError::NoDistanceBand {
                rule: self.name().to_string(),
                distance,
            }
        })?;

        let earnings = band
            .earnings
            .get(fare_earn_category)
            .copied()
            .ok_or_else(|| self.identity.category_not_earned(fare_earn_category))?;

        let notes = format!(
            "{:.0} miles flown, within the {} mile band",
            distance,
            band.label()
        );

        Ok(self.identity.result(fare_earn_category, notes, earnings))
    }
}
