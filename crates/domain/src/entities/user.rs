use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A stored user row. The credential hash is loaded but never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "UID")]
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "UserName")]
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(rename = "NationalID")]
    pub national_id: String,
    #[serde(rename = "creatTime")]
    pub created_at: NaiveDateTime,
}

/// Validated insert form; the password has already been hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub national_id: String,
}

/// Allow-listed partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub national_id: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.national_id.is_none()
    }
}
