use crate::schema::users;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Request payload, and the value handed to `UserRepository::save`.
///
/// `id: None` lets storage assign the identifier. Text fields that are
/// missing from the JSON body are stored as empty strings.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Insertable, AsChangeset,
)]
#[table_name = "users"]
#[serde(default)]
pub struct UserMessage {
    pub id: Option<i64>,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl User {
    /// Overwrites every mutable field with `changes`, keeping this user's id.
    pub fn overwrite_with(self, changes: UserMessage) -> UserMessage {
        UserMessage {
            id: Some(self.id),
            ..changes
        }
    }

    pub(crate) fn from_message(id: i64, user: UserMessage) -> User {
        User {
            id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            username: user.username,
            password: user.password,
        }
    }
}
