use log::info;
use std::sync::Arc;

use crate::auth::Principal;
use crate::constants::MIN_PHONE_DIGITS;
use crate::errors::{Error, Result, ValidationError};
use crate::notifications::normalize_phone;

use super::settings_model::{AdminConfig, WHATSAPP_SETTING_KEY};
use super::settings_repository::SettingsRepositoryTrait;

/// Service for operator configuration. Any authenticated principal may
/// read it (clients need the handoff number); only the operator writes.
pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService { repository }
    }

    pub fn get_admin_config(&self, _principal: &Principal) -> Result<AdminConfig> {
        let whatsapp = self
            .repository
            .get_setting(WHATSAPP_SETTING_KEY)?
            .unwrap_or_default();
        Ok(AdminConfig { whatsapp })
    }

    pub fn update_whatsapp(&self, principal: &Principal, raw: &str) -> Result<AdminConfig> {
        principal.ensure_admin()?;

        let digits = normalize_phone(raw);
        if digits.len() < MIN_PHONE_DIGITS {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "WhatsApp number must carry at least {} digits including the country code",
                MIN_PHONE_DIGITS
            ))));
        }

        self.repository.set_setting(WHATSAPP_SETTING_KEY, &digits)?;
        info!("Updated operator WhatsApp handoff number");
        Ok(AdminConfig { whatsapp: digits })
    }
}
