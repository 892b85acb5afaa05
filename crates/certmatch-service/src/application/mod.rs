//! Certification application services.

pub mod service;

pub use service::{ApplicationQuery, ApplicationService};
