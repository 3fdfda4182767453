mod common;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use finvest_core::auth::{AccessControl, IdentityProvider};
use finvest_core::clients::{ClientRepository, ClientService, NewClient};
use finvest_core::errors::{Error, Result};

/// Stand-in for the external identity provider: accepts every credential
/// and mints a fresh principal id.
struct StaticIdentity;

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn register_credential(&self, _email: &str, _password: &str) -> Result<String> {
        Ok(Uuid::new_v4().to_string())
    }
}

fn service(pool: &Arc<finvest_core::db::DbPool>) -> ClientService {
    ClientService::new(
        Arc::new(ClientRepository::new(pool.clone())),
        Arc::new(StaticIdentity),
        Arc::new(AccessControl::new("ops@finvest.app")),
    )
}

fn new_client(name: &str, username: &str) -> NewClient {
    NewClient {
        name: name.to_string(),
        username: username.to_string(),
        password: "s3cret!".to_string(),
        phone: "919876543210".to_string(),
        city: "Mumbai".to_string(),
        join_date: "Jan 2025".to_string(),
        welcome_note: "Welcome aboard".to_string(),
    }
}

#[tokio::test]
async fn onboarding_derives_the_login_email_from_the_username() {
    let db_dir = common::get_test_db_path("client_onboarding");
    let pool = common::setup_pool(&db_dir);
    let clients = service(&pool);
    let operator = common::operator();

    let profile = clients
        .create_client(&operator, new_client("Asha Rao", "Asha Rao"))
        .await
        .unwrap();

    assert_eq!(profile.email, "asha.rao@finvest.app");
    assert_eq!(profile.username, "asha rao");
    assert_eq!(profile.pan, None);

    // The new principal can read its own profile; a stranger cannot.
    let own = common::client_principal(&profile.id, &profile.email);
    assert!(clients.get_profile(&own, &profile.id).is_ok());
    let stranger = common::client_principal("someone-else", "x@finvest.app");
    assert!(matches!(
        clients.get_profile(&stranger, &profile.id),
        Err(Error::Authorization(_))
    ));

    common::delete_db_dir(&db_dir);
}

#[tokio::test]
async fn onboarding_rejects_short_passwords_and_non_operators() {
    let db_dir = common::get_test_db_path("client_onboarding_guards");
    let pool = common::setup_pool(&db_dir);
    let clients = service(&pool);
    let operator = common::operator();

    let mut short = new_client("Asha Rao", "asha");
    short.password = "12345".to_string();
    assert!(matches!(
        clients.create_client(&operator, short).await,
        Err(Error::Validation(_))
    ));

    let stranger = common::client_principal("client-x", "x@finvest.app");
    assert!(matches!(
        clients.create_client(&stranger, new_client("Asha Rao", "asha")).await,
        Err(Error::Authorization(_))
    ));

    // A taken username means a taken login email.
    clients
        .create_client(&operator, new_client("Asha Rao", "asha"))
        .await
        .unwrap();
    assert!(matches!(
        clients.create_client(&operator, new_client("Another Asha", "asha")).await,
        Err(Error::Validation(_))
    ));

    common::delete_db_dir(&db_dir);
}

#[test]
fn pan_updates_normalize_and_validate() {
    let db_dir = common::get_test_db_path("pan_updates");
    let pool = common::setup_pool(&db_dir);
    let clients = service(&pool);

    common::seed_client(&pool, "client-a", "Asha Rao", "919876543210");
    let own = common::client_principal("client-a", "asha.rao@finvest.app");

    let profile = clients.update_pan(&own, "client-a", " abcde1234f ").unwrap();
    assert_eq!(profile.pan.as_deref(), Some("ABCDE1234F"));

    assert!(matches!(
        clients.update_pan(&own, "client-a", "1BCDE1234F"),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        clients.update_pan(&own, "client-a", "ABCDE124F"),
        Err(Error::Validation(_))
    ));

    // Another client may not touch it; the operator may.
    let stranger = common::client_principal("client-b", "rahul@finvest.app");
    assert!(matches!(
        clients.update_pan(&stranger, "client-a", "ABCDE1234F"),
        Err(Error::Authorization(_))
    ));
    assert!(clients
        .update_pan(&common::operator(), "client-a", "ZZZZZ9999Z")
        .is_ok());

    common::delete_db_dir(&db_dir);
}

#[test]
fn directory_hides_the_operator_record() {
    let db_dir = common::get_test_db_path("client_directory");
    let pool = common::setup_pool(&db_dir);
    let clients = service(&pool);
    let operator = common::operator();

    common::seed_client(&pool, "client-a", "Asha Rao", "919876543210");
    common::seed_client(&pool, "op-row", "Ops", "919000011111");

    let listed = clients.list_clients(&operator).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "client-a");

    let client = common::client_principal("client-a", "asha.rao@finvest.app");
    assert!(matches!(
        clients.list_clients(&client),
        Err(Error::Authorization(_))
    ));

    common::delete_db_dir(&db_dir);
}

#[test]
fn greeting_link_targets_the_profile_phone() {
    let db_dir = common::get_test_db_path("greeting_handoff");
    let pool = common::setup_pool(&db_dir);
    let clients = service(&pool);
    let operator = common::operator();

    common::seed_client(&pool, "client-a", "Asha Rao", "+91 98765 43210");

    let uri = clients.greeting_handoff_uri(&operator, "client-a").unwrap();
    assert!(uri.starts_with("https://wa.me/919876543210?text="));
    assert!(uri.contains("Asha%20Rao"));

    let client = common::client_principal("client-a", "asha.rao@finvest.app");
    assert!(matches!(
        clients.greeting_handoff_uri(&client, "client-a"),
        Err(Error::Authorization(_))
    ));

    common::delete_db_dir(&db_dir);
}
