//! Turns free-text address input into exactly one [`ResolvedAddress`].

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::model::ResolvedAddress;
use crate::ports::{AddressPort, PortError};

// Greedy on purpose: only the last "vei"/"veg" on a line is rewritten.
static ROAD_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*ve)(i|g)(.*)").expect("road suffix pattern is valid"));

/// Rewrite "vei"/"veg" to "ve*" so the registry matches either spelling.
///
/// `"Norumveien 23 Sørum"` becomes `"Norumve*en 23 Sørum"`. Input without a
/// road suffix is returned untouched.
#[must_use]
pub fn normalize_search(search: &str) -> Cow<'_, str> {
    ROAD_SUFFIX.replace_all(search, "${1}*${3}")
}

/// Resolves search text against the address registry.
#[derive(Clone)]
pub struct AddressResolver {
    port: Arc<dyn AddressPort>,
}

impl AddressResolver {
    /// Create a resolver backed by the given registry port.
    #[must_use]
    pub fn new(port: Arc<dyn AddressPort>) -> Self {
        Self { port }
    }

    /// Resolve `search` to a single address.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::AddressNotFound`] for zero matches or blank input,
    /// [`PortError::AmbiguousAddress`] for more than one match, and
    /// [`PortError::Transport`] when the registry cannot be reached.
    pub async fn resolve(&self, search: &str) -> Result<ResolvedAddress, PortError> {
        if search.trim().is_empty() {
            return Err(PortError::AddressNotFound {
                search: search.to_owned(),
            });
        }

        let normalized = normalize_search(search);
        debug!(%search, %normalized, "looking up address");

        let mut matches = self.port.lookup(&normalized).await?;
        match matches.len() {
            0 => Err(PortError::AddressNotFound {
                search: search.to_owned(),
            }),
            1 => matches.pop().ok_or_else(|| PortError::AddressNotFound {
                search: search.to_owned(),
            }),
            count => Err(PortError::AmbiguousAddress {
                search: search.to_owned(),
                count,
            }),
        }
    }
}
