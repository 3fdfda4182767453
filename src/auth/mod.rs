// Module declarations
pub(crate) mod access_control;
pub(crate) mod identity;

// Re-export the public interface
pub use access_control::{AccessControl, Principal, Role};
pub use identity::IdentityProvider;
