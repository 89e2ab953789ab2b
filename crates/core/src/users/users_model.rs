//! User domain models.

use serde::{Deserialize, Serialize};

/// A registered account.
///
/// `password_hash` is an opaque PHC string produced by the server's
/// credential hasher; this crate never sees plaintext passwords.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Input model for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
