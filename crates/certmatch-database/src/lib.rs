//! # certmatch-database
//!
//! Persistence for CertMatch: the store traits services depend on, their
//! PostgreSQL implementations, an in-memory implementation, and the
//! [`Stores`] bundle that picks one from configuration.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use provider::Stores;
pub use store::{ApplicationStore, CompanyStore, ContractStore, ScheduleStore, UserStore};
