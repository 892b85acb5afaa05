//! Contract entities.

pub mod model;
pub mod status;

pub use model::{Contract, ContractFilter, CreateContract};
pub use status::ContractStatus;
