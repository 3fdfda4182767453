use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::notifications;
use crate::schema::notifications::dsl::*;

use super::notifications_model::{Notification, NotificationDB};

pub trait NotificationRepositoryTrait: Send + Sync {
    fn insert(&self, notification: NotificationDB) -> Result<Notification>;
    fn list(&self) -> Result<Vec<Notification>>;
    fn get_by_id(&self, notification_id: &str) -> Result<Notification>;
    fn mark_read(&self, notification_id: &str) -> Result<Notification>;
    fn unread_count(&self) -> Result<i64>;
}

pub struct NotificationRepository {
    pool: Arc<DbPool>,
}

impl NotificationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        NotificationRepository { pool }
    }

    fn find_db(&self, notification_id: &str) -> Result<NotificationDB> {
        let mut conn = get_connection(&self.pool)?;
        notifications
            .find(notification_id)
            .first::<NotificationDB>(&mut conn)
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Notification {} not found", notification_id)))
    }
}

impl NotificationRepositoryTrait for NotificationRepository {
    fn insert(&self, notification: NotificationDB) -> Result<Notification> {
        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(notifications::table)
            .values(&notification)
            .execute(&mut conn)?;
        Ok(notification.into())
    }

    /// Newest first, the order the inbox renders them in.
    fn list(&self) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = notifications
            .order(timestamp.desc())
            .load::<NotificationDB>(&mut conn)?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    fn get_by_id(&self, notification_id: &str) -> Result<Notification> {
        self.find_db(notification_id).map(Notification::from)
    }

    /// Idempotent: marking an already-read notification is a no-op, not an
    /// error.
    fn mark_read(&self, notification_id: &str) -> Result<Notification> {
        let existing = self.find_db(notification_id)?;
        if existing.is_read {
            return Ok(existing.into());
        }
        let mut conn = get_connection(&self.pool)?;
        diesel::update(notifications.find(notification_id))
            .set(is_read.eq(true))
            .execute(&mut conn)?;
        Ok(Notification {
            read: true,
            ..existing.into()
        })
    }

    fn unread_count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let count = notifications
            .filter(is_read.eq(false))
            .count()
            .get_result::<i64>(&mut conn)?;
        Ok(count)
    }
}
