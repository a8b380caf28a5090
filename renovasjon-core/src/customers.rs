//! Enrollment check against the waste service customer registry.

use std::sync::Arc;

use tracing::debug;

use crate::model::MunicipalityCode;
use crate::ports::{CustomerPort, PortError};

/// Answers whether a municipality uses the waste service.
#[derive(Clone)]
pub struct CustomerRegistry {
    port: Arc<dyn CustomerPort>,
}

impl CustomerRegistry {
    /// Create a registry backed by the given port.
    #[must_use]
    pub fn new(port: Arc<dyn CustomerPort>) -> Self {
        Self { port }
    }

    /// Fetch the customer list and check `code` by exact match. Nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::Transport`] when the registry cannot be reached.
    pub async fn is_customer(&self, code: &MunicipalityCode) -> Result<bool, PortError> {
        let customers = self.port.enrolled_municipalities().await?;
        debug!(count = customers.len(), %code, "fetched customer list");
        Ok(customers.iter().any(|customer| customer == code))
    }
}
