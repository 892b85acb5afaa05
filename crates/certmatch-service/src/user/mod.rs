//! User account services.

pub mod service;

pub use service::{RegisterUser, UserService};
