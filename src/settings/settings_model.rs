use diesel::prelude::*;
use serde::{Deserialize, Serialize};

pub const WHATSAPP_SETTING_KEY: &str = "operator_whatsapp";

/// Operator-wide configuration. Currently just the WhatsApp number that
/// client handoffs are addressed to; stored normalized to bare digits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminConfig {
    pub whatsapp: String,
}

impl AdminConfig {
    pub fn is_configured(&self) -> bool {
        !self.whatsapp.is_empty()
    }
}

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::app_settings)]
#[diesel(primary_key(setting_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SettingDB {
    pub setting_key: String,
    pub setting_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_counts_as_unconfigured() {
        assert!(!AdminConfig::default().is_configured());
        assert!(AdminConfig {
            whatsapp: "919000011111".to_string()
        }
        .is_configured());
    }
}
