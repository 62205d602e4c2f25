//! Credential collaborators for the REST layer: bearer tokens and password
//! hashes. The data layer only ever stores the hash strings produced here.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::TokenService;
