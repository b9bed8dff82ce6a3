//! Keyed consultation store with guarded transitions.
//!
//! Transitions run under the write lock, so concurrent calls against one
//! consultation serialize and the model's forward-only rules decide the
//! winner. Reads take the shared lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::common::Clock;

use super::errors::ConsultationError;
use super::models::{Consultation, ConsultationId};

pub struct ConsultationRepository {
    clock: Arc<dyn Clock>,
    consultations: RwLock<HashMap<ConsultationId, Consultation>>,
}

impl ConsultationRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            consultations: RwLock::new(HashMap::new()),
        }
    }

    /// New consultations always start in `pending` with no expert.
    pub async fn create(
        &self,
        farmer_id: String,
        crop_type: String,
        diagnosis_summary: String,
        confidence_score: f32,
    ) -> Consultation {
        let consultation = Consultation::new(
            farmer_id,
            crop_type,
            diagnosis_summary,
            confidence_score,
            self.clock.now(),
        );

        let mut consultations = self.consultations.write().await;
        consultations.insert(consultation.id, consultation.clone());
        info!(id = %consultation.id, farmer = %consultation.farmer_id, "consultation created");
        consultation
    }

    pub async fn get(&self, id: ConsultationId) -> Result<Consultation, ConsultationError> {
        let consultations = self.consultations.read().await;
        consultations
            .get(&id)
            .cloned()
            .ok_or(ConsultationError::NotFound)
    }

    pub async fn list_for_farmer(&self, farmer_id: &str) -> Vec<Consultation> {
        let consultations = self.consultations.read().await;
        consultations
            .values()
            .filter(|c| c.farmer_id == farmer_id)
            .cloned()
            .collect()
    }

    pub async fn list_all(&self) -> Vec<Consultation> {
        let consultations = self.consultations.read().await;
        consultations.values().cloned().collect()
    }

    pub async fn assign(
        &self,
        id: ConsultationId,
        expert_id: &str,
    ) -> Result<Consultation, ConsultationError> {
        self.transition(id, "assigned", |c, now| c.assign(expert_id, now))
            .await
    }

    pub async fn start(
        &self,
        id: ConsultationId,
        actor: &str,
    ) -> Result<Consultation, ConsultationError> {
        self.transition(id, "started", |c, now| c.start(actor, now))
            .await
    }

    pub async fn complete(
        &self,
        id: ConsultationId,
        actor: &str,
        response: &str,
    ) -> Result<Consultation, ConsultationError> {
        self.transition(id, "completed", |c, now| c.complete(actor, response, now))
            .await
    }

    pub async fn len(&self) -> usize {
        self.consultations.read().await.len()
    }

    async fn transition(
        &self,
        id: ConsultationId,
        verb: &'static str,
        apply: impl FnOnce(
            &mut Consultation,
            chrono::DateTime<chrono::Utc>,
        ) -> Result<(), ConsultationError>,
    ) -> Result<Consultation, ConsultationError> {
        let now = self.clock.now();
        let mut consultations = self.consultations.write().await;
        let consultation = consultations
            .get_mut(&id)
            .ok_or(ConsultationError::NotFound)?;

        apply(consultation, now)?;
        info!(id = %id, status = %consultation.status, "consultation {}", verb);
        Ok(consultation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SystemClock;
    use crate::domains::consultation::models::ConsultationStatus;

    fn repo() -> ConsultationRepository {
        ConsultationRepository::new(Arc::new(SystemClock))
    }

    async fn seeded(repo: &ConsultationRepository) -> ConsultationId {
        repo.create(
            "F1".to_string(),
            "Tomato".to_string(),
            "Tomato Blight".to_string(),
            0.87,
        )
        .await
        .id
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repo();
        let id = seeded(&repo).await;

        let fetched = repo.get(id).await.unwrap();
        assert_eq!(fetched.status, ConsultationStatus::Pending);
        assert_eq!(fetched.crop_type, "Tomato");
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let repo = repo();
        let err = repo.get(ConsultationId::new()).await.unwrap_err();
        assert!(matches!(err, ConsultationError::NotFound));
    }

    #[tokio::test]
    async fn test_guarded_transitions() {
        let repo = repo();
        let id = seeded(&repo).await;

        let c = repo.assign(id, "E1").await.unwrap();
        assert_eq!(c.status, ConsultationStatus::Assigned);

        // A failed transition is reported and leaves state untouched
        assert!(matches!(
            repo.start(id, "E2").await.unwrap_err(),
            ConsultationError::Forbidden
        ));
        assert_eq!(repo.get(id).await.unwrap().status, ConsultationStatus::Assigned);

        let c = repo.start(id, "E1").await.unwrap();
        assert_eq!(c.status, ConsultationStatus::InProgress);

        let c = repo.complete(id, "E1", "Remove affected leaves.").await.unwrap();
        assert_eq!(c.status, ConsultationStatus::Completed);
    }

    #[tokio::test]
    async fn test_list_for_farmer() {
        let repo = repo();
        seeded(&repo).await;
        repo.create("F2".to_string(), "Potato".to_string(), "Late Blight".to_string(), 0.71)
            .await;

        assert_eq!(repo.list_for_farmer("F1").await.len(), 1);
        assert_eq!(repo.list_for_farmer("F3").await.len(), 0);
        assert_eq!(repo.list_all().await.len(), 2);
    }
}
