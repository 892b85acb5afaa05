//! PostgreSQL implementations of the store traits.

pub mod application;
pub mod company;
pub mod contract;
pub mod schedule;
pub mod user;

pub use application::ApplicationRepository;
pub use company::CompanyRepository;
pub use contract::ContractRepository;
pub use schedule::ScheduleRepository;
pub use user::UserRepository;

/// Name of the constraint a database error violated, if any.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) => db.constraint(),
        _ => None,
    }
}
