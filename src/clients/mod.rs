// Module declarations
pub(crate) mod clients_model;
pub(crate) mod clients_repository;
pub(crate) mod clients_service;

// Re-export the public interface
pub use clients_model::{normalize_pan, ClientDB, ClientProfile, NewClient};
pub use clients_repository::{ClientRepository, ClientRepositoryTrait};
pub use clients_service::ClientService;
