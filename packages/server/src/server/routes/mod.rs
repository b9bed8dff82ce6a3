// HTTP routes
pub mod auth;
pub mod consultations;
pub mod health;

pub use auth::*;
pub use consultations::*;
pub use health::*;
