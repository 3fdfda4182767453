// Module declarations
pub(crate) mod portfolios_model;
pub(crate) mod portfolios_repository;
pub(crate) mod portfolios_service;

// Re-export the public interface
pub use portfolios_model::{Holding, NewHolding, Portfolio, PortfolioDB};
pub use portfolios_repository::{PortfolioRepository, PortfolioRepositoryTrait};
pub use portfolios_service::PortfolioService;
