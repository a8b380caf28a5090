//! Address lookup against the Geonorge address API of the Norwegian mapping authority.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use renovasjon_core::{
    config::AddressRegistryConfig,
    model::{MunicipalityCode, ResolvedAddress},
    ports::{AddressPort, PortError},
};

/// Fields requested from the registry; everything else is filtered server side.
const FIELD_FILTER: &str = "adresser.kommunenummer,\
                            adresser.adressenavn,\
                            adresser.adressekode,\
                            adresser.nummer,\
                            adresser.kommunenavn,\
                            adresser.postnummer,\
                            adresser.poststed";

/// Response from the `sok` endpoint, reduced by [`FIELD_FILTER`].
#[derive(Debug, Deserialize)]
struct SearchResponse {
    adresser: Vec<AddressEntry>,
}

/// Single address match.
#[derive(Debug, Deserialize)]
struct AddressEntry {
    adressenavn: String,
    adressekode: u32,
    nummer: u32,
    kommunenavn: String,
    kommunenummer: String,
    postnummer: String,
    poststed: String,
}

impl From<AddressEntry> for ResolvedAddress {
    fn from(entry: AddressEntry) -> Self {
        ResolvedAddress {
            street: entry.adressenavn,
            street_code: entry.adressekode,
            house_number: entry.nummer,
            municipality: entry.kommunenavn,
            municipality_code: MunicipalityCode(entry.kommunenummer),
            postal_code: entry.postnummer,
            postal_place: entry.poststed,
        }
    }
}

/// Address registry backed by Geonorge.
pub struct GeonorgeAddressPort {
    client: Client,
    url: String,
}

impl GeonorgeAddressPort {
    /// Create a new address port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: &AddressRegistryConfig) -> Self {
        Self {
            client,
            url: config.url.clone(),
        }
    }

    fn search_request(&self, search: &str) -> RequestBuilder {
        self.client
            .get(&self.url)
            .query(&[("sok", search), ("filtrer", FIELD_FILTER)])
    }
}

#[async_trait]
impl AddressPort for GeonorgeAddressPort {
    async fn lookup(&self, search: &str) -> Result<Vec<ResolvedAddress>, PortError> {
        let response = fetch_json::<SearchResponse>(self.search_request(search)).await?;
        debug!(%search, matches = response.adresser.len(), "address registry answered");

        Ok(response
            .adresser
            .into_iter()
            .map(ResolvedAddress::from)
            .collect())
    }
}

/// Build the address port for the given client and settings.
#[must_use]
pub fn address_port(client: Client, config: &AddressRegistryConfig) -> Arc<dyn AddressPort> {
    Arc::new(GeonorgeAddressPort::new(client, config))
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}

#[cfg(test)]
mod testing;
