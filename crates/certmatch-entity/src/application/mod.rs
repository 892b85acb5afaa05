//! Certification application entities.

pub mod model;
pub mod status;

pub use model::{Application, ApplicationFilter, CreateApplication};
pub use status::ApplicationStatus;
