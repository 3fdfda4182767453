use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result, ValidationError};
use crate::schema::clients;
use crate::schema::clients::dsl::*;

use super::clients_model::{ClientDB, ClientProfile};

pub trait ClientRepositoryTrait: Send + Sync {
    fn insert(&self, client: ClientDB) -> Result<ClientProfile>;
    fn get_by_id(&self, client_id: &str) -> Result<ClientProfile>;
    fn list(&self) -> Result<Vec<ClientProfile>>;
    fn update_pan(&self, client_id: &str, pan_value: &str) -> Result<ClientProfile>;
}

pub struct ClientRepository {
    pool: Arc<DbPool>,
}

impl ClientRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        ClientRepository { pool }
    }
}

impl ClientRepositoryTrait for ClientRepository {
    fn insert(&self, client: ClientDB) -> Result<ClientProfile> {
        let mut conn = get_connection(&self.pool)?;
        diesel::insert_into(clients::table)
            .values(&client)
            .execute(&mut conn)
            .map_err(|e| match e {
                // A taken login email is a caller problem, not a store one.
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    Error::Validation(ValidationError::CredentialRejected(format!(
                        "Login email {} is already in use",
                        client.email
                    )))
                }
                other => other.into(),
            })?;
        Ok(client.into())
    }

    fn get_by_id(&self, client_id: &str) -> Result<ClientProfile> {
        let mut conn = get_connection(&self.pool)?;
        clients
            .find(client_id)
            .first::<ClientDB>(&mut conn)
            .optional()?
            .map(ClientProfile::from)
            .ok_or_else(|| Error::NotFound(format!("Client with id {} not found", client_id)))
    }

    fn list(&self) -> Result<Vec<ClientProfile>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = clients.order(name.asc()).load::<ClientDB>(&mut conn)?;
        Ok(rows.into_iter().map(ClientProfile::from).collect())
    }

    fn update_pan(&self, client_id: &str, pan_value: &str) -> Result<ClientProfile> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::update(clients.find(client_id))
            .set(pan.eq(Some(pan_value.to_string())))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::NotFound(format!(
                "Client with id {} not found",
                client_id
            )));
        }

        self.get_by_id(client_id)
    }
}
