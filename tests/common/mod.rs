use chrono::Local;
use std::sync::Arc;

use finvest_core::auth::{Principal, Role};
use finvest_core::clients::{ClientDB, ClientRepository, ClientRepositoryTrait};
use finvest_core::companies::{NewCompany, Risk, Sector};
use finvest_core::db;
use finvest_core::db::DbPool;

pub fn get_test_db_path(test_id: &str) -> String {
    let now = Local::now();

    now.format(&format!("./tests/output/%Y%m%d/%H%M%S-{}/", test_id))
        .to_string()
}

pub fn setup_pool(db_dir: &str) -> Arc<DbPool> {
    let db_path = db::init(db_dir).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    pool
}

pub fn delete_db_dir(db_dir: &str) {
    let _ = std::fs::remove_dir_all(db_dir);
}

pub fn operator() -> Principal {
    Principal {
        id: "op-1".to_string(),
        email: "ops@finvest.app".to_string(),
        role: Role::Admin,
    }
}

pub fn client_principal(id: &str, email: &str) -> Principal {
    Principal {
        id: id.to_string(),
        email: email.to_string(),
        role: Role::Client,
    }
}

pub fn new_company(name: &str, sector: Sector, min_invest: i64, valuation: i64) -> NewCompany {
    NewCompany {
        name: name.to_string(),
        sector,
        min_invest,
        current_valuation: valuation,
        initial_valuation: None,
        expected_returns: "15-20%".to_string(),
        risk: Risk::Medium,
        lot_size: Some("0.5% / lot".to_string()),
        description: String::new(),
        active: true,
    }
}

pub fn seed_client(pool: &Arc<DbPool>, id: &str, name: &str, phone: &str) {
    let repository = ClientRepository::new(pool.clone());
    repository
        .insert(ClientDB {
            id: id.to_string(),
            name: name.to_string(),
            email: format!(
                "{}@finvest.app",
                name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".")
            ),
            phone: phone.to_string(),
            city: "Mumbai".to_string(),
            pan: None,
            join_date: "Jan 2025".to_string(),
            welcome_note: String::new(),
            username: name.to_lowercase(),
            created_at: chrono::Utc::now().naive_utc(),
        })
        .expect("Failed to seed client");
}
