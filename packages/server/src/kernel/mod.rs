// Infrastructure: dependency container, traits and background tasks

pub mod deps;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, WhatsAppAdapter};
pub use traits::BaseOtpDelivery;
