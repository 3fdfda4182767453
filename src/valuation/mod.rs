// Module declarations
pub(crate) mod valuation_calculator;
pub(crate) mod valuation_model;
pub(crate) mod valuation_service;

// Re-export the public interface
pub use valuation_calculator::ValuationCalculator;
pub use valuation_model::{HoldingValuation, PortfolioSummary, SectorAllocation};
pub use valuation_service::ValuationService;
