//! SQL DDL for bootstrapping a fresh tea database.
//! Tables are listed in dependency order: referenced tables come first.

/// `types` and `owner` before `tea` and `teaOwners`.
/// Both foreign-key edges are `ON UPDATE CASCADE ON DELETE RESTRICT`.
/// Names must contain something other than whitespace.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK (length(trim(name)) > 0)
);

CREATE TABLE tea (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK (length(trim(name)) > 0),
    teaType INTEGER NOT NULL,
    FOREIGN KEY (teaType) REFERENCES types (id)
        ON UPDATE CASCADE
        ON DELETE RESTRICT
);

CREATE TABLE owner (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK (length(trim(name)) > 0)
);

CREATE TABLE teaOwners (
    teaID INTEGER NOT NULL,
    ownerID INTEGER NOT NULL,
    PRIMARY KEY (teaID, ownerID),
    FOREIGN KEY (teaID) REFERENCES tea (id)
        ON UPDATE CASCADE
        ON DELETE RESTRICT,
    FOREIGN KEY (ownerID) REFERENCES owner (id)
        ON UPDATE CASCADE
        ON DELETE RESTRICT
);

CREATE TABLE user (
    username TEXT NOT NULL UNIQUE PRIMARY KEY,
    password TEXT NOT NULL
);
"#;

pub const TEA_TYPES_TABLE: &str = "types";
pub const OWNERS_TABLE: &str = "owner";

/// Split the bundled DDL into individual statements; sqlx prepares one at a time.
pub fn statements() -> impl Iterator<Item = &'static str> {
    SQLITE_INIT
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
