use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Role carried by a resolved principal for the rest of the request.
/// Resolved exactly once; operation guards only ever look at this enum,
/// never at the raw email again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Client,
}

/// An authenticated caller. The identity provider hands us a stable id and
/// an email; everything else about the caller lives in the clients store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Guard for operator-only operations.
    pub fn ensure_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::Authorization(format!(
                "principal {} is not the operator",
                self.id
            )))
        }
    }

    /// Guard for operations scoped to a single client's own data. The
    /// operator passes unconditionally.
    pub fn ensure_self_or_admin(&self, client_id: &str) -> Result<()> {
        if self.is_admin() || self.id == client_id {
            Ok(())
        } else {
            Err(Error::Authorization(format!(
                "principal {} may not access data of client {}",
                self.id, client_id
            )))
        }
    }
}

/// Resolves authenticated principals into role-scoped capabilities.
pub struct AccessControl {
    operator_email: String,
}

impl AccessControl {
    pub fn new(operator_email: impl Into<String>) -> Self {
        AccessControl {
            operator_email: operator_email.into(),
        }
    }

    /// Turns the identity provider's output into a `Principal`. A missing
    /// id or email means the caller never authenticated.
    pub fn resolve(&self, id: Option<&str>, email: Option<&str>) -> Result<Principal> {
        let id = id.ok_or_else(|| {
            Error::Authentication("no authenticated principal".to_string())
        })?;
        let email = email.ok_or_else(|| {
            Error::Authentication("authenticated principal has no email".to_string())
        })?;

        let role = if email.eq_ignore_ascii_case(&self.operator_email) {
            Role::Admin
        } else {
            Role::Client
        };

        Ok(Principal {
            id: id.to_string(),
            email: email.to_string(),
            role,
        })
    }

    pub fn operator_email(&self) -> &str {
        &self.operator_email
    }
}
