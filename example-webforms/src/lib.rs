pub mod customer_feedback;
pub mod event_registration;
pub mod sandwich_order;

pub use customer_feedback::customer_feedback;
pub use event_registration::{WORKSHOPS, event_registration, event_registration_config};
pub use sandwich_order::{RATING_COMPONENT, sandwich_order};
