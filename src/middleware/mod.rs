pub mod auth;
pub mod extract;

pub use auth::RequireToken;
pub use extract::{ApiJson, ApiPath};
