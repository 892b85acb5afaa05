//! Schedule entities.

pub mod model;

pub use model::{CreateSchedule, Schedule, UpdateSchedule};
