// Module declarations
pub(crate) mod handoff;
pub(crate) mod notifications_model;
pub(crate) mod notifications_repository;
pub(crate) mod notifications_service;

// Re-export the public interface
pub use handoff::{
    build_handoff_uri, client_interest_message, normalize_phone, operator_greeting_message,
    operator_reply_message,
};
pub use notifications_model::{Notification, NotificationDB};
pub use notifications_repository::{NotificationRepository, NotificationRepositoryTrait};
pub use notifications_service::{InterestReceipt, NotificationService};
