// Module declarations
pub(crate) mod settings_model;
pub(crate) mod settings_repository;
pub(crate) mod settings_service;

// Re-export the public interface
pub use settings_model::{AdminConfig, SettingDB, WHATSAPP_SETTING_KEY};
pub use settings_repository::{SettingsRepository, SettingsRepositoryTrait};
pub use settings_service::SettingsService;
