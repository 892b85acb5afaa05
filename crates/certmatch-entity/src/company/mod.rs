//! Company domain entities and the company search predicate.

pub mod model;
pub mod search;

pub use model::{Company, CompanyWithOwner, CreateCompany, UpdateCompany};
pub use search::{CompanyClause, CompanyOrder, CompanyPredicate, SearchCriteria};
