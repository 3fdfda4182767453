use log::info;
use std::sync::Arc;

use crate::auth::{AccessControl, IdentityProvider, Principal};
use crate::constants::LOGIN_EMAIL_DOMAIN;
use crate::errors::Result;
use crate::notifications::{build_handoff_uri, operator_greeting_message};

use super::clients_model::{normalize_pan, ClientDB, ClientProfile, NewClient};
use super::clients_repository::ClientRepositoryTrait;

/// Service for client records. Onboarding registers the login credential
/// with the external identity provider and stores the profile under the
/// returned principal id.
pub struct ClientService {
    repository: Arc<dyn ClientRepositoryTrait>,
    identity: Arc<dyn IdentityProvider>,
    access: Arc<AccessControl>,
}

impl ClientService {
    pub fn new(
        repository: Arc<dyn ClientRepositoryTrait>,
        identity: Arc<dyn IdentityProvider>,
        access: Arc<AccessControl>,
    ) -> Self {
        ClientService {
            repository,
            identity,
            access,
        }
    }

    pub async fn create_client(
        &self,
        principal: &Principal,
        new_client: NewClient,
    ) -> Result<ClientProfile> {
        principal.ensure_admin()?;
        new_client.validate()?;

        let email = new_client.login_email(LOGIN_EMAIL_DOMAIN);
        let principal_id = self
            .identity
            .register_credential(&email, &new_client.password)
            .await?;

        let client = ClientDB {
            id: principal_id,
            name: new_client.name,
            email,
            phone: new_client.phone,
            city: new_client.city,
            pan: None,
            join_date: new_client.join_date,
            welcome_note: new_client.welcome_note,
            username: new_client.username.trim().to_lowercase(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        let profile = self.repository.insert(client)?;
        info!("Onboarded client {} ({})", profile.name, profile.id);
        Ok(profile)
    }

    /// Operator directory view. The operator's own record, if one exists
    /// in the store, is filtered out.
    pub fn list_clients(&self, principal: &Principal) -> Result<Vec<ClientProfile>> {
        principal.ensure_admin()?;
        let operator = self.access.operator_email().to_lowercase();
        Ok(self
            .repository
            .list()?
            .into_iter()
            .filter(|c| c.email.to_lowercase() != operator)
            .collect())
    }

    pub fn get_profile(&self, principal: &Principal, client_id: &str) -> Result<ClientProfile> {
        principal.ensure_self_or_admin(client_id)?;
        self.repository.get_by_id(client_id)
    }

    /// Chat link for the operator to greet a client from the directory,
    /// addressed to the phone number on the profile.
    pub fn greeting_handoff_uri(&self, principal: &Principal, client_id: &str) -> Result<String> {
        principal.ensure_admin()?;
        let client = self.repository.get_by_id(client_id)?;
        build_handoff_uri(&client.phone, &operator_greeting_message(&client.name))
    }

    /// The only client-editable field on the profile.
    pub fn update_pan(
        &self,
        principal: &Principal,
        client_id: &str,
        pan_input: &str,
    ) -> Result<ClientProfile> {
        principal.ensure_self_or_admin(client_id)?;
        let pan = normalize_pan(pan_input)?;
        self.repository.update_pan(client_id, &pan)
    }
}
