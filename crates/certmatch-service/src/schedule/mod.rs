//! Schedule services.

pub mod service;

pub use service::ScheduleService;
