//! The set of ports a [`WasteCollectionService`](crate::service::WasteCollectionService) composes.

use std::sync::Arc;

use crate::ports::{AddressPort, CustomerPort, FractionPort, SchedulePort};

/// Ports for the three external services, shared between service instances.
#[derive(Clone)]
pub struct Backends {
    /// Address registry.
    pub addresses: Arc<dyn AddressPort>,
    /// Customer registry.
    pub customers: Arc<dyn CustomerPort>,
    /// Fraction definitions.
    pub fractions: Arc<dyn FractionPort>,
    /// Collection calendar.
    pub schedule: Arc<dyn SchedulePort>,
}

impl Backends {
    /// Bundle the given ports.
    #[must_use]
    pub fn new(
        addresses: Arc<dyn AddressPort>,
        customers: Arc<dyn CustomerPort>,
        fractions: Arc<dyn FractionPort>,
        schedule: Arc<dyn SchedulePort>,
    ) -> Self {
        Self {
            addresses,
            customers,
            fractions,
            schedule,
        }
    }
}
