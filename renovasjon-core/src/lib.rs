//! Core types and service wiring for looking up Norwegian waste collection schedules.

/// Bundle of ports the service talks to.
pub mod backend;
/// Fraction definitions keyed by id.
pub mod catalog;
/// Endpoint, key and HTTP settings.
pub mod config;
/// Enrollment check against the customer registry.
pub mod customers;
/// Domain models and identifiers shared by all providers.
pub mod model;
/// Traits describing the provider interfaces.
pub mod ports;
/// Search normalization and single-match address resolution.
pub mod resolver;
/// High-level service facade used by clients.
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::*;
pub use catalog::*;
pub use config::*;
pub use customers::*;
pub use model::*;
pub use ports::*;
pub use resolver::*;
pub use service::*;
