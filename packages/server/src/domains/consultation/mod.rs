//! Consultation domain - a farmer's diagnostic case moving through a
//! fixed lifecycle until expert resolution.
//!
//! Transition rules are pure methods on the model; the repository adds
//! keyed locking and `updated_at` stamping. Status only moves forward:
//! `pending → assigned → in_progress → completed`.

pub mod errors;
pub mod models;
pub mod repository;

pub use errors::ConsultationError;
pub use models::{Consultation, ConsultationId, ConsultationStatus};
pub use repository::ConsultationRepository;
