//! Domain data structures for addresses, waste fractions, and collection dates.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Four digit identifier of a Norwegian municipality, e.g. `"3030"`.
pub struct MunicipalityCode(pub String);

impl MunicipalityCode {
    /// Borrow the raw code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MunicipalityCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for MunicipalityCode {
    fn from(code: &str) -> Self {
        MunicipalityCode(code.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Identifier of a waste fraction within a municipality.
pub struct FractionId(pub i64);

impl fmt::Display for FractionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Canonical address as returned by the national address registry.
pub struct ResolvedAddress {
    /// Street name.
    pub street: String,
    /// Street code, unique within the municipality.
    pub street_code: u32,
    /// House number without letter suffix.
    pub house_number: u32,
    /// Municipality display name.
    pub municipality: String,
    /// Municipality code.
    pub municipality_code: MunicipalityCode,
    /// Postal code.
    pub postal_code: String,
    /// Postal place.
    pub postal_place: String,
}

impl ResolvedAddress {
    /// Nationally unique street code: municipality code followed by street code.
    #[must_use]
    pub fn composite_street_code(&self) -> String {
        format!("{}{}", self.municipality_code, self.street_code)
    }

    /// Human-friendly label, e.g. `Jonas Lies gate 20, 2000 LILLESTRØM`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.street, self.house_number, self.postal_code, self.postal_place
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Waste fraction definition offered by a municipality.
pub struct Fraction {
    /// Fraction identifier.
    pub id: FractionId,
    /// Display name, e.g. “Papir”.
    pub name: String,
    /// Icon reference as delivered by the provider. Not interpreted.
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Upcoming collection dates for one fraction, exactly as the schedule service sent them.
pub struct RawCollectionEntry {
    /// Fraction the dates belong to.
    pub fraction_id: FractionId,
    /// Date strings in `YYYY-MM-DDTHH:MM:SS` form, soonest first.
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Next two collections of a fraction, joined with its display name.
pub struct FractionCollection {
    /// Fraction identifier.
    pub fraction_id: FractionId,
    /// Fraction display name from the catalog.
    pub fraction_name: String,
    /// First upcoming collection.
    pub first_date: NaiveDateTime,
    /// Collection after `first_date`.
    pub next_date: NaiveDateTime,
}
