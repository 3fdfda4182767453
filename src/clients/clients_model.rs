use chrono::NaiveDateTime;
use diesel::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_PASSWORD_LEN;
use crate::errors::{Error, Result, ValidationError};

lazy_static! {
    static ref PAN_RE: Regex = Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap();
}

/// Uppercases the input and enforces the PAN format contract.
pub fn normalize_pan(input: &str) -> Result<String> {
    let normalized = input.trim().to_uppercase();
    if !PAN_RE.is_match(&normalized) {
        return Err(Error::Validation(ValidationError::InvalidPan(
            input.to_string(),
        )));
    }
    Ok(normalized)
}

/// A client record. The id equals the identity provider's principal id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub pan: Option<String>,
    pub join_date: String,
    pub welcome_note: String,
    pub username: String,
    pub created_at: NaiveDateTime,
}

/// Input model for operator-side client onboarding. The login credential
/// is registered with the identity provider in the same operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub welcome_note: String,
}

impl NewClient {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "username".to_string(),
            )));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(Error::Validation(ValidationError::CredentialRejected(
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            )));
        }
        Ok(())
    }

    /// Login identifier handed to the identity provider.
    pub fn login_email(&self, domain: &str) -> String {
        let user = self
            .username
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(".");
        format!("{}@{}", user, domain)
    }
}

/// Database model for clients
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClientDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub pan: Option<String>,
    pub join_date: String,
    pub welcome_note: String,
    pub username: String,
    pub created_at: NaiveDateTime,
}

impl From<ClientDB> for ClientProfile {
    fn from(db: ClientDB) -> Self {
        ClientProfile {
            id: db.id,
            name: db.name,
            email: db.email,
            phone: db.phone,
            city: db.city,
            pan: db.pan,
            join_date: db.join_date,
            welcome_note: db.welcome_note,
            username: db.username,
            created_at: db.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_is_uppercased_before_validation() {
        assert_eq!(normalize_pan("abcde1234f").unwrap(), "ABCDE1234F");
        assert_eq!(normalize_pan("ABCDE1234F").unwrap(), "ABCDE1234F");
    }

    #[test]
    fn malformed_pan_is_rejected() {
        assert!(normalize_pan("ABCDE123F").is_err());
        assert!(normalize_pan("1BCDE1234F").is_err());
        assert!(normalize_pan("ABCDE1234FX").is_err());
        assert!(normalize_pan("").is_err());
    }

    #[test]
    fn login_email_is_derived_from_username() {
        let new_client = NewClient {
            name: "Rahul Sharma".to_string(),
            username: " Rahul Sharma ".to_string(),
            password: "secret1".to_string(),
            phone: String::new(),
            city: String::new(),
            join_date: String::new(),
            welcome_note: String::new(),
        };
        assert_eq!(new_client.login_email("finvest.app"), "rahul.sharma@finvest.app");
    }

    #[test]
    fn short_password_is_a_credential_error() {
        let new_client = NewClient {
            name: "A".to_string(),
            username: "a".to_string(),
            password: "12345".to_string(),
            phone: String::new(),
            city: String::new(),
            join_date: String::new(),
            welcome_note: String::new(),
        };
        assert!(new_client.validate().is_err());
    }
}
