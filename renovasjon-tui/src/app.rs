use renovasjon_core::{
    backend::Backends,
    model::FractionCollection,
    ports::PortError,
    service::WasteCollectionService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    AddressInput,
    Collections,
}

pub(crate) struct App {
    pub backends: Backends,

    pub screen: Screen,
    pub address_input: String,

    pub service: Option<WasteCollectionService>,
    pub collections: Vec<FractionCollection>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(backends: Backends, address: Option<String>) -> Self {
        Self {
            backends,
            screen: Screen::AddressInput,
            address_input: address.unwrap_or_default(),
            service: None,
            collections: Vec::new(),
            is_loading: false,
            error_message: None,
        }
    }

    /// Resolve the typed address and, if the municipality is a customer, load collections.
    pub(crate) async fn lookup_address(&mut self) {
        let search = self.address_input.trim().to_owned();
        if search.is_empty() {
            self.error_message = Some("Type an address, then press Enter".into());
            return;
        }

        self.service = None;
        self.collections.clear();

        match WasteCollectionService::connect(self.backends.clone(), &search).await {
            Ok(service) => {
                let enrolled = service.is_enrolled();
                self.service = Some(service);
                self.screen = Screen::Collections;
                self.error_message = None;
                // The collections screen explains non-enrollment itself.
                if enrolled {
                    self.refresh_collections().await;
                }
            }
            Err(err) => {
                self.error_message = Some(format!("Lookup failed: {err}"));
            }
        }
    }

    /// Fetch the calendar again for the current address.
    pub(crate) async fn refresh_collections(&mut self) {
        let Some(service) = self.service.as_ref() else {
            self.error_message = Some("No address looked up yet".into());
            return;
        };

        match service.waste_collections().await {
            Ok(collections) => {
                self.collections = collections;
                self.error_message = None;
            }
            Err(PortError::NotEnrolled { .. }) => {
                self.collections.clear();
                self.error_message = None;
            }
            Err(err) => {
                self.collections.clear();
                self.error_message = Some(format!("Failed to load collections: {err}"));
            }
        }
    }

    pub(crate) fn back_to_input(&mut self) {
        self.screen = Screen::AddressInput;
    }
}
