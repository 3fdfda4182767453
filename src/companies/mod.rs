// Module declarations
pub(crate) mod companies_model;
pub(crate) mod companies_repository;
pub(crate) mod companies_service;

// Re-export the public interface
pub use companies_model::{Company, CompanyDB, CompanyUpdate, NewCompany, Risk, Sector};
pub use companies_repository::{CompanyRepository, CompanyRepositoryTrait};
pub use companies_service::CompanyService;
