//! Contract services.

pub mod service;

pub use service::{ContractQuery, ContractService, NewContract};
