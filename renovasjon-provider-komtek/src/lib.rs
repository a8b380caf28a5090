//! Backends for Min Renovasjon: the Norkart customer registry and the Komtek
//! fraction and calendar API, which is only reachable through a proxy.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use renovasjon_core::{
    backend::Backends,
    config::{CustomerRegistryConfig, KomtekConfig, RenovasjonConfig},
    model::{Fraction, FractionId, MunicipalityCode, RawCollectionEntry, ResolvedAddress},
    ports::{AddressPort, CustomerPort, FractionPort, PortError, SchedulePort},
};

const APP_KEY_HEADER: &str = "RenovasjonAppKey";
const MUNICIPALITY_HEADER: &str = "Kommunenr";

/// Entry of the registered app customer list.
#[derive(Debug, Deserialize)]
struct Customer {
    #[serde(rename = "Number")]
    number: String,
    // name, county and a few other fields exist, we ignore them
}

/// Fraction as returned by `fraksjoner/`
#[derive(Debug, Deserialize)]
struct FractionInfo {
    #[serde(rename = "Id")]
    id: i64,
    #[serde(rename = "Navn")]
    name: String,
    #[serde(rename = "Ikon", default)]
    icon: Option<String>,
}

/// Calendar entry as returned by `tommekalender/`
#[derive(Debug, Deserialize)]
struct CalendarEntry {
    #[serde(rename = "FraksjonId")]
    fraction_id: i64,
    #[serde(rename = "Tommedatoer")]
    dates: Vec<String>, // "YYYY-MM-DDTHH:MM:SS", soonest first
}

/// Customer registry listing municipalities that use the Min Renovasjon app.
pub struct NorkartCustomerPort {
    client: Client,
    url: String,
    app_id: String,
}

impl NorkartCustomerPort {
    /// Create a new customer port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: &CustomerRegistryConfig) -> Self {
        Self {
            client,
            url: config.url.clone(),
            app_id: config.app_id.clone(),
        }
    }

    fn customers_request(&self) -> RequestBuilder {
        self.client
            .get(&self.url)
            .query(&[("Appid", self.app_id.as_str())])
    }
}

#[async_trait]
impl CustomerPort for NorkartCustomerPort {
    async fn enrolled_municipalities(&self) -> Result<Vec<MunicipalityCode>, PortError> {
        let customers = fetch_json::<Vec<Customer>>(self.customers_request()).await?;

        Ok(customers
            .into_iter()
            .map(|customer| MunicipalityCode(customer.number))
            .collect())
    }
}

/// Request builder for the Komtek API behind the app proxy.
#[derive(Clone)]
struct KomtekProxy {
    client: Client,
    proxy_url: String,
    endpoint_url: String,
    app_key: String,
}

impl KomtekProxy {
    fn new(client: Client, config: &KomtekConfig) -> Self {
        Self {
            client,
            proxy_url: config.proxy_url.clone(),
            endpoint_url: config.endpoint_url.clone(),
            app_key: config.app_key.clone(),
        }
    }

    /// `endpoint` is appended to the upstream root verbatim, including any
    /// trailing slash or query string it needs.
    fn request(&self, endpoint: &str, code: &MunicipalityCode) -> RequestBuilder {
        let server = format!("{}{endpoint}", self.endpoint_url);
        debug!(%server, %code, "komtek request");

        self.client
            .get(&self.proxy_url)
            .header(APP_KEY_HEADER, &self.app_key)
            .header(MUNICIPALITY_HEADER, code.as_str())
            .query(&[("server", server)])
    }
}

/// Fraction definitions served by Komtek.
pub struct KomtekFractionPort {
    proxy: KomtekProxy,
}

impl KomtekFractionPort {
    /// Create a new fraction port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: &KomtekConfig) -> Self {
        Self {
            proxy: KomtekProxy::new(client, config),
        }
    }

    fn fractions_request(&self, code: &MunicipalityCode) -> RequestBuilder {
        self.proxy.request("fraksjoner/", code)
    }
}

#[async_trait]
impl FractionPort for KomtekFractionPort {
    async fn list_fractions(&self, code: &MunicipalityCode) -> Result<Vec<Fraction>, PortError> {
        let fractions = fetch_json::<Vec<FractionInfo>>(self.fractions_request(code)).await?;

        Ok(fractions
            .into_iter()
            .map(|info| Fraction {
                id: FractionId(info.id),
                name: info.name,
                icon: info.icon,
            })
            .collect())
    }
}

/// Collection calendar served by Komtek.
pub struct KomtekSchedulePort {
    proxy: KomtekProxy,
}

impl KomtekSchedulePort {
    /// Create a new schedule port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: &KomtekConfig) -> Self {
        Self {
            proxy: KomtekProxy::new(client, config),
        }
    }

    fn calendar_request(&self, address: &ResolvedAddress) -> RequestBuilder {
        let code = &address.municipality_code;
        let house_number = address.house_number.to_string();
        let street_code = address.composite_street_code();

        self.proxy
            .request(&format!("tommekalender/?kommunenr={code}"), code)
            .query(&[
                ("gatenavn", address.street.as_str()),
                ("gatekode", street_code.as_str()),
                ("husnr", house_number.as_str()),
            ])
    }
}

#[async_trait]
impl SchedulePort for KomtekSchedulePort {
    async fn fetch_schedule(
        &self,
        address: &ResolvedAddress,
    ) -> Result<Vec<RawCollectionEntry>, PortError> {
        let calendar = fetch_json::<Vec<CalendarEntry>>(self.calendar_request(address)).await?;

        Ok(calendar
            .into_iter()
            .map(|entry| RawCollectionEntry {
                fraction_id: FractionId(entry.fraction_id),
                dates: entry.dates,
            })
            .collect())
    }
}

/// Build the full backend bundle around the given address registry.
#[must_use]
pub fn backends(
    client: Client,
    config: &RenovasjonConfig,
    addresses: Arc<dyn AddressPort>,
) -> Backends {
    let customers = Arc::new(NorkartCustomerPort::new(
        client.clone(),
        &config.customer_registry,
    ));
    let fractions = Arc::new(KomtekFractionPort::new(client.clone(), &config.komtek));
    let schedule = Arc::new(KomtekSchedulePort::new(client, &config.komtek));

    Backends::new(addresses, customers, fractions, schedule)
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
