use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::app_settings;
use crate::schema::app_settings::dsl::*;

use super::settings_model::SettingDB;

pub trait SettingsRepositoryTrait: Send + Sync {
    fn get_setting(&self, key: &str) -> Result<Option<String>>;
    fn set_setting(&self, key: &str, value: &str) -> Result<()>;
}

pub struct SettingsRepository {
    pool: Arc<DbPool>,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        SettingsRepository { pool }
    }
}

impl SettingsRepositoryTrait for SettingsRepository {
    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let row = app_settings
            .find(key)
            .first::<SettingDB>(&mut conn)
            .optional()?;
        Ok(row.map(|s| s.setting_value))
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        let row = SettingDB {
            setting_key: key.to_string(),
            setting_value: value.to_string(),
        };
        diesel::replace_into(app_settings::table)
            .values(&row)
            .execute(&mut conn)?;
        Ok(())
    }
}
