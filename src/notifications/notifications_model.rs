use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// An interest notification raised when a client taps through on a
/// company. Client contact details and the company name are snapshotted
/// at creation so the record stays useful if either side changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub company_id: String,
    pub company_name: String,
    pub interested_min: i64,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub read: bool,
}

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationDB {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub company_id: String,
    pub company_name: String,
    pub interested_min: i64,
    pub message: String,
    pub timestamp: NaiveDateTime,
    pub is_read: bool,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        Notification {
            id: db.id,
            client_id: db.client_id,
            client_name: db.client_name,
            client_phone: db.client_phone,
            client_email: db.client_email,
            company_id: db.company_id,
            company_name: db.company_name,
            interested_min: db.interested_min,
            message: db.message,
            timestamp: db.timestamp,
            read: db.is_read,
        }
    }
}
