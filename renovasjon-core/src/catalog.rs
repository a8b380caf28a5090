//! Fraction definitions of a municipality and the join against collection calendars.

use std::collections::HashMap;
use std::slice;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::model::{Fraction, FractionCollection, FractionId, RawCollectionEntry};
use crate::ports::PortError;

/// Timestamp layout used by the collection calendar.
pub const COLLECTION_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a calendar timestamp such as `2020-04-17T00:00:00`.
///
/// # Errors
///
/// Returns [`PortError::Parse`] unless the input is exactly `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_collection_date(raw: &str) -> Result<NaiveDateTime, PortError> {
    NaiveDateTime::parse_from_str(raw, COLLECTION_DATE_FORMAT).map_err(PortError::from)
}

/// Fractions of one municipality, kept in provider order and indexed by id.
#[derive(Debug, Clone, Default)]
pub struct FractionCatalog {
    fractions: Vec<Fraction>,
    index: HashMap<FractionId, usize>,
}

impl FractionCatalog {
    /// Build a catalog. When an id repeats, the first definition wins.
    #[must_use]
    pub fn new(fractions: Vec<Fraction>) -> Self {
        let mut kept = Vec::with_capacity(fractions.len());
        let mut index = HashMap::with_capacity(fractions.len());

        for fraction in fractions {
            if index.contains_key(&fraction.id) {
                warn!(id = %fraction.id, name = %fraction.name, "ignoring duplicate fraction id");
                continue;
            }
            index.insert(fraction.id, kept.len());
            kept.push(fraction);
        }

        Self {
            fractions: kept,
            index,
        }
    }

    /// Look up a fraction by id.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnknownFraction`] when the id is not in the catalog.
    pub fn get(&self, id: FractionId) -> Result<&Fraction, PortError> {
        self.index
            .get(&id)
            .and_then(|position| self.fractions.get(*position))
            .ok_or(PortError::UnknownFraction(id))
    }

    /// Number of fractions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    /// Whether the catalog holds no fractions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    /// Iterate over fractions in provider order.
    pub fn iter(&self) -> slice::Iter<'_, Fraction> {
        self.fractions.iter()
    }
}

impl<'cat> IntoIterator for &'cat FractionCatalog {
    type Item = &'cat Fraction;
    type IntoIter = slice::Iter<'cat, Fraction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Attach fraction names to raw calendar entries and parse their first two dates.
///
/// Output order follows `entries`; nothing is sorted or deduplicated.
///
/// # Errors
///
/// Returns [`PortError::UnknownFraction`] when an entry has no catalog match,
/// [`PortError::IncompleteSchedule`] when it has fewer than two dates, and
/// [`PortError::Parse`] for malformed dates.
pub fn join_collections(
    catalog: &FractionCatalog,
    entries: Vec<RawCollectionEntry>,
) -> Result<Vec<FractionCollection>, PortError> {
    entries
        .into_iter()
        .map(|entry| {
            let fraction = catalog.get(entry.fraction_id)?;
            let (Some(first), Some(next)) = (entry.dates.first(), entry.dates.get(1)) else {
                return Err(PortError::IncompleteSchedule {
                    fraction: entry.fraction_id,
                    dates: entry.dates.len(),
                });
            };

            Ok(FractionCollection {
                fraction_id: entry.fraction_id,
                fraction_name: fraction.name.clone(),
                first_date: parse_collection_date(first)?,
                next_date: parse_collection_date(next)?,
            })
        })
        .collect()
}
