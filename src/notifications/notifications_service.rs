use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Principal;
use crate::clients::ClientRepositoryTrait;
use crate::companies::CompanyRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::settings::{AdminConfig, SettingsRepositoryTrait, WHATSAPP_SETTING_KEY};
use crate::utils::format_utils::format_inr;

use super::handoff::{build_handoff_uri, client_interest_message, operator_reply_message};
use super::notifications_model::{Notification, NotificationDB};
use super::notifications_repository::NotificationRepositoryTrait;

/// What a client gets back from registering interest: the stored
/// notification plus, when the operator number is configured, the
/// pre-filled chat link to continue the conversation on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestReceipt {
    pub notification: Notification,
    pub handoff_uri: Option<String>,
}

pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
    client_repository: Arc<dyn ClientRepositoryTrait>,
    company_repository: Arc<dyn CompanyRepositoryTrait>,
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl NotificationService {
    pub fn new(
        repository: Arc<dyn NotificationRepositoryTrait>,
        client_repository: Arc<dyn ClientRepositoryTrait>,
        company_repository: Arc<dyn CompanyRepositoryTrait>,
        settings_repository: Arc<dyn SettingsRepositoryTrait>,
    ) -> Self {
        NotificationService {
            repository,
            client_repository,
            company_repository,
            settings_repository,
        }
    }

    /// Records a client's interest in a company. The company must still be
    /// open for investment; client contact details and the company minimum
    /// are snapshotted onto the record.
    pub fn express_interest(&self, principal: &Principal, company_id: &str) -> Result<InterestReceipt> {
        let company = self.company_repository.get_by_id(company_id)?;
        if !company.active {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "{} is not open for investment",
                company.name
            ))));
        }

        let client = self.client_repository.get_by_id(&principal.id)?;

        let notification = self.repository.insert(NotificationDB {
            id: Uuid::new_v4().to_string(),
            client_id: client.id.clone(),
            client_name: client.name.clone(),
            client_phone: client.phone.clone(),
            client_email: client.email.clone(),
            company_id: company.id.clone(),
            company_name: company.name.clone(),
            interested_min: company.min_invest,
            message: format!(
                "{} is interested in {} (min {})",
                client.name,
                company.name,
                format_inr(company.min_invest)
            ),
            timestamp: chrono::Utc::now().naive_utc(),
            is_read: false,
        })?;

        // Best effort: a missing operator number downgrades the handoff,
        // it does not fail the interest itself.
        let config = AdminConfig {
            whatsapp: self
                .settings_repository
                .get_setting(WHATSAPP_SETTING_KEY)?
                .unwrap_or_default(),
        };
        let handoff_uri = if config.is_configured() {
            Some(build_handoff_uri(
                &config.whatsapp,
                &client_interest_message(
                    &client.name,
                    &client.email,
                    &client.phone,
                    &company.name,
                    company.min_invest,
                ),
            )?)
        } else {
            None
        };

        info!(
            "Client {} expressed interest in company {}",
            client.id, company.id
        );
        Ok(InterestReceipt {
            notification,
            handoff_uri,
        })
    }

    /// Operator inbox, newest first.
    pub fn list_notifications(&self, principal: &Principal) -> Result<Vec<Notification>> {
        principal.ensure_admin()?;
        self.repository.list()
    }

    pub fn unread_count(&self, principal: &Principal) -> Result<i64> {
        principal.ensure_admin()?;
        self.repository.unread_count()
    }

    /// Unread → Read. Already-read notifications pass through unchanged.
    pub fn mark_read(&self, principal: &Principal, notification_id: &str) -> Result<Notification> {
        principal.ensure_admin()?;
        self.repository.mark_read(notification_id)
    }

    /// Chat link for the operator to follow up on a notification, built
    /// against the client's phone number captured at interest time.
    pub fn reply_handoff_uri(&self, principal: &Principal, notification_id: &str) -> Result<String> {
        principal.ensure_admin()?;
        let notification = self.repository.get_by_id(notification_id)?;
        build_handoff_uri(
            &notification.client_phone,
            &operator_reply_message(&notification.client_name, &notification.company_name),
        )
    }
}
