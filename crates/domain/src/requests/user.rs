use super::fields::{self, Body};
use crate::entities::{NewUser, UserChanges};
use crate::errors::DomainError;
use crate::services::CredentialHasher;

pub const NATIONAL_ID_LEN: usize = 13;

/// Columns a user payload may carry. Declaration order is the order in
/// which required fields are checked on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Surname,
    UserName,
    Email,
    Password,
    NationalId,
}

impl UserField {
    pub const ALL: [UserField; 6] = [
        UserField::Name,
        UserField::Surname,
        UserField::UserName,
        UserField::Email,
        UserField::Password,
        UserField::NationalId,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            UserField::Name => "Name",
            UserField::Surname => "Surname",
            UserField::UserName => "UserName",
            UserField::Email => "email",
            UserField::Password => "Password",
            UserField::NationalId => "NationalID",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateUser {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub national_id: String,
}

impl CreateUser {
    pub fn from_body(body: &Body) -> Result<Self, DomainError> {
        let keys = UserField::ALL.map(|f| f.key());
        fields::require_all(body, &keys)?;

        let request = Self {
            name: fields::required_string(body, UserField::Name.key())?,
            surname: fields::required_string(body, UserField::Surname.key())?,
            username: fields::required_string(body, UserField::UserName.key())?,
            email: fields::required_string(body, UserField::Email.key())?,
            password: fields::required_string(body, UserField::Password.key())?,
            national_id: fields::required_string(body, UserField::NationalId.key())?,
        };

        validate_email(&request.email)?;
        validate_national_id(&request.national_id)?;
        Ok(request)
    }

    pub async fn into_new_user(self, hasher: &dyn CredentialHasher) -> Result<NewUser, DomainError> {
        let password_hash = hasher.hash(&self.password).await?;
        Ok(NewUser {
            name: self.name,
            surname: self.surname,
            username: self.username,
            email: self.email,
            password_hash,
            national_id: self.national_id,
        })
    }
}

/// Partial user update holding the plaintext password until it is hashed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub national_id: Option<String>,
}

impl UserPatch {
    pub fn from_body(body: &Body) -> Result<Self, DomainError> {
        let mut patch = Self::default();
        for field in UserField::ALL {
            let Some(value) = fields::optional(body, field.key()) else {
                continue;
            };
            let value = fields::string(field.key(), value)?;
            match field {
                UserField::Name => patch.name = Some(value),
                UserField::Surname => patch.surname = Some(value),
                UserField::UserName => patch.username = Some(value),
                UserField::Email => {
                    validate_email(&value)?;
                    patch.email = Some(value);
                }
                UserField::Password => patch.password = Some(value),
                UserField::NationalId => {
                    validate_national_id(&value)?;
                    patch.national_id = Some(value);
                }
            }
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.national_id.is_none()
    }

    pub async fn into_changes(self, hasher: &dyn CredentialHasher) -> Result<UserChanges, DomainError> {
        let password_hash = match self.password {
            Some(password) => Some(hasher.hash(&password).await?),
            None => None,
        };
        Ok(UserChanges {
            name: self.name,
            surname: self.surname,
            username: self.username,
            email: self.email,
            password_hash,
            national_id: self.national_id,
        })
    }
}

pub fn validate_national_id(national_id: &str) -> Result<(), DomainError> {
    if national_id.chars().count() != NATIONAL_ID_LEN {
        return Err(DomainError::validation(format!(
            "NationalID must be exactly {NATIONAL_ID_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !valid {
        return Err(DomainError::validation("email must be a valid email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn body(value: Value) -> Body {
        value.as_object().cloned().unwrap()
    }

    fn valid() -> Value {
        json!({
            "Name": "Ada",
            "Surname": "Lovelace",
            "UserName": "ada",
            "email": "ada@example.com",
            "Password": "analytical",
            "NationalID": "1234567890123"
        })
    }

    #[test]
    fn national_id_must_be_exactly_thirteen_characters() {
        assert!(validate_national_id("123456789012").is_err());
        assert!(validate_national_id("12345678901234").is_err());
        assert!(validate_national_id("1234567890123").is_ok());
    }

    #[test]
    fn first_missing_field_is_reported() {
        let mut payload = valid();
        payload.as_object_mut().unwrap().remove("UserName");
        payload.as_object_mut().unwrap().remove("Password");
        let err = CreateUser::from_body(&body(payload)).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: UserName");
    }

    #[test]
    fn presence_is_checked_before_semantics() {
        let mut payload = valid();
        payload["NationalID"] = json!("short");
        payload.as_object_mut().unwrap().remove("Surname");
        let err = CreateUser::from_body(&body(payload)).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: Surname");
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut payload = valid();
        payload["email"] = json!("not-an-address");
        let err = CreateUser::from_body(&body(payload)).unwrap_err();
        assert_eq!(err.to_string(), "email must be a valid email address");
    }

    #[test]
    fn patch_ignores_fields_outside_allow_list() {
        let patch = UserPatch::from_body(&body(json!({"UID": 9, "creatTime": "x"}))).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_revalidates_national_id() {
        let err = UserPatch::from_body(&body(json!({"NationalID": "123"}))).unwrap_err();
        assert_eq!(err.to_string(), "NationalID must be exactly 13 characters");
    }
}
