//! # certmatch-auth
//!
//! Credential handling for CertMatch accounts.
//!
//! Identity itself is asserted by the upstream gateway; this crate only
//! covers what the marketplace stores: Argon2id password hashes and the
//! password policy applied at registration.

pub mod password;

pub use password::{PasswordHasher, PasswordValidator};
