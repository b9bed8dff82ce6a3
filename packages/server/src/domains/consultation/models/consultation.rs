use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::super::errors::ConsultationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsultationId(pub Uuid);

impl ConsultationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConsultationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConsultationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConsultationStatus::Pending => "pending",
            ConsultationStatus::Assigned => "assigned",
            ConsultationStatus::InProgress => "in_progress",
            ConsultationStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// A diagnostic case submitted by a farmer.
///
/// Diagnosis fields are attached at creation by the (external)
/// classification pipeline. `expert_id` is non-null for every status
/// except `pending`; `completed` is terminal.
#[derive(Debug, Clone, Serialize)]
pub struct Consultation {
    pub id: ConsultationId,
    pub farmer_id: String,
    pub expert_id: Option<String>,
    pub status: ConsultationStatus,
    pub crop_type: String,
    pub diagnosis_summary: String,
    pub confidence_score: f32,
    pub expert_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Consultation {
    pub fn new(
        farmer_id: String,
        crop_type: String,
        diagnosis_summary: String,
        confidence_score: f32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ConsultationId::new(),
            farmer_id,
            expert_id: None,
            status: ConsultationStatus::Pending,
            crop_type,
            diagnosis_summary,
            confidence_score,
            expert_response: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// `pending → assigned`. Double assignment is an invalid transition,
    /// not a reassignment.
    pub fn assign(
        &mut self,
        expert_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ConsultationError> {
        if self.status != ConsultationStatus::Pending {
            return Err(self.invalid("assign"));
        }
        self.expert_id = Some(expert_id.to_string());
        self.status = ConsultationStatus::Assigned;
        self.updated_at = now;
        Ok(())
    }

    /// `assigned → in_progress`, only by the assigned expert.
    pub fn start(&mut self, actor: &str, now: DateTime<Utc>) -> Result<(), ConsultationError> {
        if self.status != ConsultationStatus::Assigned {
            return Err(self.invalid("start"));
        }
        self.check_actor(actor)?;
        self.status = ConsultationStatus::InProgress;
        self.updated_at = now;
        Ok(())
    }

    /// `in_progress → completed` (terminal), only by the assigned expert.
    pub fn complete(
        &mut self,
        actor: &str,
        response: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ConsultationError> {
        if self.status != ConsultationStatus::InProgress {
            return Err(self.invalid("complete"));
        }
        self.check_actor(actor)?;
        self.expert_response = Some(response.to_string());
        self.status = ConsultationStatus::Completed;
        self.updated_at = now;
        Ok(())
    }

    fn check_actor(&self, actor: &str) -> Result<(), ConsultationError> {
        if self.expert_id.as_deref() != Some(actor) {
            return Err(ConsultationError::Forbidden);
        }
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> ConsultationError {
        ConsultationError::InvalidTransition {
            from: self.status,
            action,
        }
    }
}
