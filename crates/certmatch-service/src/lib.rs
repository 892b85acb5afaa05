//! # certmatch-service
//!
//! Business logic service layer for CertMatch. Each service owns the
//! authorization and state-transition rules of one resource and talks to
//! persistence only through the store traits.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod access;
pub mod application;
pub mod company;
pub mod context;
pub mod contract;
pub mod schedule;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use application::ApplicationService;
pub use company::CompanyService;
pub use context::RequestContext;
pub use contract::ContractService;
pub use schedule::ScheduleService;
pub use user::UserService;
