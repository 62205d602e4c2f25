use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A category of tea.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct TeaType {
    pub id: i64,
    pub name: String,
}

/// Someone who holds teas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Owner {
    pub id: i64,
    pub name: String,
}

/// A tea, with its type denormalized on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tea {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub tea_type: TeaType,
}

/// Flat shape of `tea JOIN types`.
#[derive(Debug, FromRow)]
pub struct DbTea {
    pub id: i64,
    pub name: String,
    pub type_id: i64,
    pub type_name: String,
}

impl From<DbTea> for Tea {
    fn from(d: DbTea) -> Self {
        Tea {
            id: d.id,
            name: d.name,
            tea_type: TeaType {
                id: d.type_id,
                name: d.type_name,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeaWithOwners {
    pub tea: Tea,
    pub owners: Vec<Owner>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeWithTeas {
    #[serde(rename = "type")]
    pub tea_type: TeaType,
    pub teas: Vec<Tea>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerWithTeas {
    pub owner: Owner,
    pub teas: Vec<Tea>,
}

/// Username and password pair as sent by clients. The store only ever sees
/// the hashed form in `password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}
