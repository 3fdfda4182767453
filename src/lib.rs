pub mod db;

pub mod auth;
pub mod clients;
pub mod companies;
pub mod notifications;
pub mod portfolios;
pub mod settings;
pub mod valuation;

pub mod constants;
pub mod errors;
pub mod schema;
pub mod utils;

pub use errors::{Error, Result};
pub use valuation::*;
