//! Database models for users.

use diesel::prelude::*;

use bullionfolio_core::users::{NewUser, User};

/// Database model for users.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserDB {
    pub fn from_new(new_user: NewUser, id: String) -> Self {
        UserDB {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
        }
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        User {
            id: db.id,
            name: db.name,
            email: db.email,
            password_hash: db.password_hash,
        }
    }
}
