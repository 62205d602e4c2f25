pub mod owner;
pub mod tea;
pub mod tea_owner;
pub mod tea_type;
pub mod user;

use serde::{Deserialize, Serialize};

use crate::error::TeaError;

/// Body of `POST /type` and `POST /owner`.
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// A reference to an existing row by id, e.g. `{"id": 3}`.
#[derive(Debug, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultResponse {
    pub result: String,
}

impl ResultResponse {
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}

/// Trimmed, non-empty name or `BadRequest`.
pub fn require_name(name: &str, what: &str) -> Result<String, TeaError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TeaError::BadRequest(format!("{what} name must not be empty")));
    }
    Ok(name.to_string())
}
