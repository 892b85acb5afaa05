//! # certmatch-entity
//!
//! Domain entity models for CertMatch. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod application;
pub mod company;
pub mod contract;
pub mod schedule;
pub mod user;
