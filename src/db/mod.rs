pub mod pg;

#[cfg(test)]
pub mod memory;

use crate::domain::models::{AnalysisRecord, CardUpsert, DigitalCard, Employee, SystemGrant};
use crate::domain::submission::Answers;
use crate::services::assessment::Assessment;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use pg::PgStore;

/// Raw questionnaire answers as persisted, after numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub email: String,
    pub answers: Answers,
    pub enc_free_text: Option<String>,
}

#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn last_submission_at(&self, email: &str) -> Result<Option<DateTime<Utc>>>;

    /// Stores the submission and its analysis together; either both rows
    /// exist afterwards or neither does. Returns `(submission_id, analysis_id)`.
    async fn insert_assessment(
        &self,
        submission: &NewSubmission,
        assessment: &Assessment,
    ) -> Result<(Uuid, Uuid)>;

    /// Every analysis, newest first.
    async fn list_analyses(&self) -> Result<Vec<AnalysisRecord>>;
}

#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Active employees with a phone number, ordered by name.
    async fn list_directory(&self) -> Result<Vec<Employee>>;

    async fn find_active_by_email(&self, email: &str) -> Result<Option<Employee>>;

    async fn find_active_by_credentials(&self, chapa: &str, cpf: &str) -> Result<Option<Employee>>;

    /// Case-insensitive match on any employee row.
    async fn email_exists(&self, email: &str) -> Result<bool>;

    /// Returns false when no active employee row was updated.
    async fn update_phone(&self, email: &str, phone: &str) -> Result<bool>;
}

#[async_trait]
pub trait CardStore: Send + Sync {
    async fn find_card_by_cpf(&self, cpf: &str) -> Result<Option<DigitalCard>>;

    async fn find_card_by_email(&self, email: &str) -> Result<Option<DigitalCard>>;

    async fn insert_card(&self, card: &CardUpsert) -> Result<()>;

    /// Keeps the stored photo when `card.foto` is `None`.
    async fn update_card(&self, card: &CardUpsert) -> Result<bool>;
}

#[async_trait]
pub trait AccessStore: Send + Sync {
    async fn grants_for(&self, email: &str) -> Result<Vec<SystemGrant>>;
}
