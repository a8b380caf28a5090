//! Traits describing provider capabilities and the shared error type.

use async_trait::async_trait;
use chrono::ParseError as ChronoParseError;
use reqwest::Error as ReqwestError;

use crate::model::{Fraction, FractionId, MunicipalityCode, RawCollectionEntry, ResolvedAddress};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while resolving an address or talking to provider backends.
pub enum PortError {
    /// Request could not be sent, returned an error status, or had an undecodable body.
    #[error("Transport error: {0}")]
    Transport(#[from] ReqwestError),
    /// Failed to parse a collection date from the provider response.
    #[error("Parse error: {0}")]
    Parse(#[from] ChronoParseError),
    /// The address registry returned no match.
    #[error("No addresses found for search string '{search}'")]
    AddressNotFound {
        /// Search text as entered by the caller.
        search: String,
    },
    /// The address registry returned more than one match.
    #[error("{count} addresses found for '{search}'. Only one address should be returned, please narrow your search")]
    AmbiguousAddress {
        /// Search text as entered by the caller.
        search: String,
        /// Number of matches.
        count: usize,
    },
    /// The municipality is not a customer of the waste service.
    #[error("{municipality} ({code}) is not a customer of Min Renovasjon")]
    NotEnrolled {
        /// Municipality display name.
        municipality: String,
        /// Municipality code.
        code: MunicipalityCode,
    },
    /// A schedule entry references a fraction missing from the catalog.
    #[error("Unknown fraction: {0}")]
    UnknownFraction(FractionId),
    /// A schedule entry carries fewer than two collection dates.
    #[error("Fraction {fraction} has {dates} collection date(s), expected at least two")]
    IncompleteSchedule {
        /// Fraction of the offending entry.
        fraction: FractionId,
        /// Number of dates received.
        dates: usize,
    },
}

#[async_trait]
/// Backend for the national address registry.
pub trait AddressPort: Send + Sync {
    /// Return every registry match for an already normalized search string.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Transport`] when the registry request fails.
    async fn lookup(&self, search: &str) -> Result<Vec<ResolvedAddress>, PortError>;
}

#[async_trait]
/// Backend listing municipalities enrolled in the waste service.
pub trait CustomerPort: Send + Sync {
    /// Fetch the codes of all enrolled municipalities.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Transport`] when the registry request fails.
    async fn enrolled_municipalities(&self) -> Result<Vec<MunicipalityCode>, PortError>;
}

#[async_trait]
/// Backend serving the waste fraction definitions of a municipality.
pub trait FractionPort: Send + Sync {
    /// Fetch all fractions known to the municipality.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Transport`] when the provider request fails.
    async fn list_fractions(&self, code: &MunicipalityCode) -> Result<Vec<Fraction>, PortError>;
}

#[async_trait]
/// Backend serving upcoming collection dates for an address.
pub trait SchedulePort: Send + Sync {
    /// Fetch the raw collection calendar of an address, in provider order.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Transport`] when the provider request fails.
    async fn fetch_schedule(
        &self,
        address: &ResolvedAddress,
    ) -> Result<Vec<RawCollectionEntry>, PortError>;
}
