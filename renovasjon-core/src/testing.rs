//! In-memory ports for driving the service in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::Backends;
use crate::model::{Fraction, FractionId, MunicipalityCode, RawCollectionEntry, ResolvedAddress};
use crate::ports::{AddressPort, CustomerPort, FractionPort, PortError, SchedulePort};

/// A real `reqwest` error, produced without touching the network.
pub(crate) async fn transport_error() -> PortError {
    reqwest::Client::new()
        .get("not a url")
        .send()
        .await
        .expect_err("relative url cannot be sent")
        .into()
}

pub(crate) fn lillestrom() -> ResolvedAddress {
    ResolvedAddress {
        street: "Jonas Lies gate".to_owned(),
        street_code: 7200,
        house_number: 20,
        municipality: "LILLESTRØM".to_owned(),
        municipality_code: MunicipalityCode::from("3030"),
        postal_code: "2000".to_owned(),
        postal_place: "LILLESTRØM".to_owned(),
    }
}

pub(crate) fn bodo() -> ResolvedAddress {
    ResolvedAddress {
        street: "Storgata".to_owned(),
        street_code: 24000,
        house_number: 92,
        municipality: "BODØ".to_owned(),
        municipality_code: MunicipalityCode::from("1804"),
        postal_code: "8006".to_owned(),
        postal_place: "BODØ".to_owned(),
    }
}

pub(crate) fn fraction(id: i64, name: &str) -> Fraction {
    Fraction {
        id: FractionId(id),
        name: name.to_owned(),
        icon: None,
    }
}

pub(crate) fn entry(id: i64, dates: &[&str]) -> RawCollectionEntry {
    RawCollectionEntry {
        fraction_id: FractionId(id),
        dates: dates.iter().map(|date| (*date).to_owned()).collect(),
    }
}

pub(crate) fn sample_fractions() -> Vec<Fraction> {
    vec![fraction(1, "Mat, plast og rest"), fraction(2, "Papir")]
}

pub(crate) fn sample_schedule() -> Vec<RawCollectionEntry> {
    vec![
        entry(1, &["2020-04-17T00:00:00", "2020-04-24T00:00:00"]),
        entry(2, &["2020-04-20T00:00:00", "2020-05-18T00:00:00"]),
    ]
}

pub(crate) struct FakeAddresses {
    matches: Option<Vec<ResolvedAddress>>,
    searches: Mutex<Vec<String>>,
}

impl FakeAddresses {
    pub(crate) fn new(matches: Vec<ResolvedAddress>) -> Arc<Self> {
        Arc::new(Self {
            matches: Some(matches),
            searches: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            matches: None,
            searches: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn searches(&self) -> Vec<String> {
        self.searches.lock().expect("searches lock").clone()
    }
}

#[async_trait]
impl AddressPort for FakeAddresses {
    async fn lookup(&self, search: &str) -> Result<Vec<ResolvedAddress>, PortError> {
        self.searches
            .lock()
            .expect("searches lock")
            .push(search.to_owned());
        match &self.matches {
            Some(matches) => Ok(matches.clone()),
            None => Err(transport_error().await),
        }
    }
}

pub(crate) struct FakeCustomers {
    codes: Option<Vec<MunicipalityCode>>,
}

impl FakeCustomers {
    pub(crate) fn new(codes: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            codes: Some(codes.iter().map(|code| MunicipalityCode::from(*code)).collect()),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self { codes: None })
    }
}

#[async_trait]
impl CustomerPort for FakeCustomers {
    async fn enrolled_municipalities(&self) -> Result<Vec<MunicipalityCode>, PortError> {
        match &self.codes {
            Some(codes) => Ok(codes.clone()),
            None => Err(transport_error().await),
        }
    }
}

pub(crate) struct FakeFractions {
    fractions: Option<Vec<Fraction>>,
    calls: AtomicUsize,
}

impl FakeFractions {
    pub(crate) fn new(fractions: Vec<Fraction>) -> Arc<Self> {
        Arc::new(Self {
            fractions: Some(fractions),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            fractions: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FractionPort for FakeFractions {
    async fn list_fractions(&self, _code: &MunicipalityCode) -> Result<Vec<Fraction>, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fractions {
            Some(fractions) => Ok(fractions.clone()),
            None => Err(transport_error().await),
        }
    }
}

pub(crate) struct FakeSchedule {
    entries: Mutex<Option<Vec<RawCollectionEntry>>>,
    calls: AtomicUsize,
}

impl FakeSchedule {
    pub(crate) fn new(entries: Vec<RawCollectionEntry>) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(Some(entries)),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    /// Replace what the next fetch returns.
    pub(crate) fn set(&self, entries: Vec<RawCollectionEntry>) {
        *self.entries.lock().expect("entries lock") = Some(entries);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchedulePort for FakeSchedule {
    async fn fetch_schedule(
        &self,
        _address: &ResolvedAddress,
    ) -> Result<Vec<RawCollectionEntry>, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().expect("entries lock").clone();
        match entries {
            Some(entries) => Ok(entries),
            None => Err(transport_error().await),
        }
    }
}

pub(crate) fn backends(
    addresses: Arc<FakeAddresses>,
    customers: Arc<FakeCustomers>,
    fractions: Arc<FakeFractions>,
    schedule: Arc<FakeSchedule>,
) -> Backends {
    Backends::new(addresses, customers, fractions, schedule)
}
