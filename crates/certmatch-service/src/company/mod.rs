//! Company profile services and company search.

pub mod service;

pub use service::{CompanyService, NewCompany};
