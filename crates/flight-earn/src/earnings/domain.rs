use serde::{Deserialize, Serialize};

/// Latitude/longitude pair, consumed only by distance calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Airport record as supplied by the hosting application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub iata: String,
    pub city: String,
    pub country: String,
    pub coordinates: Coordinates,
}

impl Airport {
    pub fn new(
        iata: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            iata: iata.into(),
            city: city.into(),
            country: country.into(),
            coordinates,
        }
    }
}

/// One flown leg between two airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from_airport: Airport,
    pub to_airport: Airport,
}

impl Segment {
    pub fn new(from_airport: Airport, to_airport: Airport) -> Self {
        Self {
            from_airport,
            to_airport,
        }
    }

    /// The same leg flown in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            from_airport: self.to_airport.clone(),
            to_airport: self.from_airport.clone(),
        }
    }
}

/// Points and status credits awarded for a single fare-earn category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EarningsRecord {
    pub qantas_points: u32,
    pub status_credits: u32,
}

impl EarningsRecord {
    pub const fn new(qantas_points: u32, status_credits: u32) -> Self {
        Self {
            qantas_points,
            status_credits,
        }
    }
}

/// Outcome of a rule calculation, carrying the rule identity for audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub rule: String,
    pub rule_url: String,
    pub fare_earn_category: String,
    pub notes: String,
    pub qantas_points: u32,
    pub status_credits: u32,
}

impl CalculationResult {
    pub fn earnings(&self) -> EarningsRecord {
        EarningsRecord::new(self.qantas_points, self.status_credits)
    }
}
