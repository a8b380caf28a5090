//! High-level service facade combining address lookup, enrollment, and calendars.

use std::sync::Arc;

use tracing::{debug, info};

use crate::backend::Backends;
use crate::catalog::{FractionCatalog, join_collections};
use crate::customers::CustomerRegistry;
use crate::model::{FractionCollection, ResolvedAddress};
use crate::ports::PortError;
use crate::resolver::AddressResolver;

/// Outcome of the enrollment check made while connecting.
#[derive(Debug, Clone)]
pub enum Enrollment {
    /// The municipality is a customer; its fractions were loaded.
    Enrolled(FractionCatalog),
    /// The municipality does not use the waste service.
    NotEnrolled,
}

/// Terminal state of a connected service, without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Collection queries are available.
    Enrolled,
    /// Collection queries fail with [`PortError::NotEnrolled`].
    NotEnrolled,
}

/// Waste collection lookup for a single resolved address.
pub struct WasteCollectionService {
    backends: Backends,
    address: ResolvedAddress,
    enrollment: Enrollment,
}

impl WasteCollectionService {
    /// Resolve `search`, check enrollment, and load fractions if enrolled.
    ///
    /// A municipality that is not a customer does not fail construction; check
    /// [`Self::state`] before asking for collections.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::AddressNotFound`] or [`PortError::AmbiguousAddress`]
    /// when the search does not pin down one address, and [`PortError::Transport`]
    /// when any backend call fails.
    pub async fn connect(backends: Backends, search: &str) -> Result<Self, PortError> {
        let address = AddressResolver::new(Arc::clone(&backends.addresses))
            .resolve(search)
            .await?;
        debug!(address = %address.label(), code = %address.municipality_code, "resolved address");

        let is_customer = CustomerRegistry::new(Arc::clone(&backends.customers))
            .is_customer(&address.municipality_code)
            .await?;

        let enrollment = if is_customer {
            let fractions = backends
                .fractions
                .list_fractions(&address.municipality_code)
                .await?;
            debug!(count = fractions.len(), "loaded fraction catalog");
            Enrollment::Enrolled(FractionCatalog::new(fractions))
        } else {
            info!(
                municipality = %address.municipality,
                code = %address.municipality_code,
                "municipality is not a customer of Min Renovasjon"
            );
            Enrollment::NotEnrolled
        };

        Ok(Self {
            backends,
            address,
            enrollment,
        })
    }

    /// The address this service was resolved to.
    #[must_use]
    pub fn address(&self) -> &ResolvedAddress {
        &self.address
    }

    /// Enrollment outcome, including the fraction catalog when enrolled.
    #[must_use]
    pub fn enrollment(&self) -> &Enrollment {
        &self.enrollment
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ServiceState {
        match self.enrollment {
            Enrollment::Enrolled(_) => ServiceState::Enrolled,
            Enrollment::NotEnrolled => ServiceState::NotEnrolled,
        }
    }

    /// Whether the municipality is a customer.
    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        self.state() == ServiceState::Enrolled
    }

    /// Fractions loaded while connecting.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::NotEnrolled`] when the municipality is not a customer.
    pub fn fractions(&self) -> Result<&FractionCatalog, PortError> {
        match &self.enrollment {
            Enrollment::Enrolled(catalog) => Ok(catalog),
            Enrollment::NotEnrolled => Err(self.not_enrolled()),
        }
    }

    /// Fetch the current calendar and join it with the cached fractions.
    ///
    /// Every call goes to the schedule backend; results are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::NotEnrolled`] without any request when the
    /// municipality is not a customer, [`PortError::Transport`] when the fetch
    /// fails, and the errors of [`join_collections`] for inconsistent data.
    pub async fn waste_collections(&self) -> Result<Vec<FractionCollection>, PortError> {
        let catalog = self.fractions()?;
        let entries = self.backends.schedule.fetch_schedule(&self.address).await?;
        debug!(count = entries.len(), "fetched collection calendar");
        join_collections(catalog, entries)
    }

    fn not_enrolled(&self) -> PortError {
        PortError::NotEnrolled {
            municipality: self.address.municipality.clone(),
            code: self.address.municipality_code.clone(),
        }
    }
}
