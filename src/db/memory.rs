//! In-memory stores used by the router tests.
use super::{AccessStore, AssessmentStore, CardStore, DirectoryStore, NewSubmission};
use crate::domain::models::{AnalysisRecord, CardUpsert, DigitalCard, Employee, SystemGrant};
use crate::services::assessment::Assessment;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone)]
pub struct StoredSubmission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub submission: NewSubmission,
}

#[derive(Default)]
struct Inner {
    submissions: Vec<StoredSubmission>,
    analyses: Vec<AnalysisRecord>,
    employees: Vec<(Employee, bool)>,
    cards: Vec<DigitalCard>,
    grants: Vec<(String, SystemGrant)>,
    fail_assessments: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_employee(&self, employee: Employee, active: bool) {
        self.inner.write().await.employees.push((employee, active));
    }

    pub async fn add_grant(&self, email: &str, sistema: &str, tipo: Option<&str>) {
        self.inner.write().await.grants.push((
            email.to_string(),
            SystemGrant {
                sistema: sistema.to_string(),
                tipo: tipo.map(str::to_string),
            },
        ));
    }

    pub async fn add_card(&self, card: DigitalCard) {
        self.inner.write().await.cards.push(card);
    }

    /// Inserts a submission with an explicit timestamp.
    pub async fn backdate_submission(&self, email: &str, submitted_at: DateTime<Utc>) {
        self.inner.write().await.submissions.push(StoredSubmission {
            id: Uuid::new_v4(),
            submitted_at,
            submission: NewSubmission {
                email: email.to_string(),
                answers: Default::default(),
                enc_free_text: None,
            },
        });
    }

    /// Makes every following `insert_assessment` fail as a dropped connection would.
    pub async fn fail_assessments(&self, fail: bool) {
        self.inner.write().await.fail_assessments = fail;
    }

    pub async fn analyses(&self) -> Vec<AnalysisRecord> {
        self.inner.read().await.analyses.clone()
    }

    pub async fn submissions(&self) -> Vec<StoredSubmission> {
        self.inner.read().await.submissions.clone()
    }

    pub async fn cards(&self) -> Vec<DigitalCard> {
        self.inner.read().await.cards.clone()
    }

    pub async fn employee(&self, email: &str) -> Option<Employee> {
        self.inner
            .read()
            .await
            .employees
            .iter()
            .find(|(e, _)| e.email == email)
            .map(|(e, _)| e.clone())
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    async fn last_submission_at(&self, email: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .inner
            .read()
            .await
            .submissions
            .iter()
            .filter(|s| s.submission.email == email)
            .map(|s| s.submitted_at)
            .max())
    }

    async fn insert_assessment(
        &self,
        submission: &NewSubmission,
        assessment: &Assessment,
    ) -> Result<(Uuid, Uuid)> {
        let mut inner = self.inner.write().await;
        if inner.fail_assessments {
            anyhow::bail!("connection reset");
        }

        let submission_id = Uuid::new_v4();
        let analysis_id = Uuid::new_v4();
        let now = Utc::now();
        let p = &assessment.percentages;
        inner.submissions.push(StoredSubmission {
            id: submission_id,
            submitted_at: now,
            submission: submission.clone(),
        });
        inner.analyses.push(AnalysisRecord {
            id: analysis_id,
            resposta_id: submission_id,
            email: submission.email.clone(),
            enc_desabafo: submission.enc_free_text.clone(),
            estresse: p.stress,
            ansiedade: p.anxiety,
            burnout: p.burnout,
            depressao: p.depression,
            equilibrio: p.balance,
            apoio: p.support,
            alerta: assessment.alert_text(),
            dicas: assessment.tip_text(),
            justificativa_ia: assessment.rationale_text(),
            sentimento: assessment.sentiment.as_str().to_string(),
            data_analise: now,
        });
        Ok((submission_id, analysis_id))
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisRecord>> {
        let mut rows = self.inner.read().await.analyses.clone();
        rows.sort_by(|a, b| b.data_analise.cmp(&a.data_analise));
        Ok(rows)
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn list_directory(&self) -> Result<Vec<Employee>> {
        let mut rows: Vec<Employee> = self
            .inner
            .read()
            .await
            .employees
            .iter()
            .filter(|(e, active)| *active && e.telefone.as_deref().unwrap_or("") != "")
            .map(|(e, _)| e.clone())
            .collect();
        rows.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(rows)
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<Employee>> {
        Ok(self
            .inner
            .read()
            .await
            .employees
            .iter()
            .find(|(e, active)| *active && e.email == email)
            .map(|(e, _)| e.clone()))
    }

    async fn find_active_by_credentials(&self, chapa: &str, cpf: &str) -> Result<Option<Employee>> {
        Ok(self
            .inner
            .read()
            .await
            .employees
            .iter()
            .find(|(e, active)| {
                *active
                    && e.chapa.as_deref() == Some(chapa)
                    && e.cpf.as_deref().map(crate::domain::contact::digits_only).as_deref()
                        == Some(cpf)
            })
            .map(|(e, _)| e.clone()))
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let needle = email.trim().to_lowercase();
        Ok(self
            .inner
            .read()
            .await
            .employees
            .iter()
            .any(|(e, _)| e.email.to_lowercase() == needle))
    }

    async fn update_phone(&self, email: &str, phone: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner
            .employees
            .iter_mut()
            .find(|(e, active)| *active && e.email == email)
        {
            Some((employee, _)) => {
                employee.telefone = Some(phone.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn find_card_by_cpf(&self, cpf: &str) -> Result<Option<DigitalCard>> {
        Ok(self.inner.read().await.cards.iter().find(|c| c.cpf == cpf).cloned())
    }

    async fn find_card_by_email(&self, email: &str) -> Result<Option<DigitalCard>> {
        Ok(self.inner.read().await.cards.iter().find(|c| c.email == email).cloned())
    }

    async fn insert_card(&self, card: &CardUpsert) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.cards.iter().any(|c| c.cpf == card.cpf) {
            anyhow::bail!("duplicate card for cpf {}", card.cpf);
        }
        let id = inner.cards.len() as i64 + 1;
        inner.cards.push(DigitalCard {
            id,
            cpf: card.cpf.clone(),
            nome: card.nome.clone(),
            email: card.email.clone(),
            cargo: card.cargo.clone(),
            foto: card.foto.clone(),
            linkedin: card.linkedin.clone(),
            whatsapp: card.whatsapp.clone(),
            instagram: card.instagram.clone(),
            lattes: card.lattes.clone(),
        });
        Ok(())
    }

    async fn update_card(&self, card: &CardUpsert) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.cards.iter_mut().find(|c| c.cpf == card.cpf) else {
            return Ok(false);
        };
        stored.nome = card.nome.clone();
        stored.email = card.email.clone();
        stored.cargo = card.cargo.clone();
        stored.linkedin = card.linkedin.clone();
        stored.whatsapp = card.whatsapp.clone();
        stored.instagram = card.instagram.clone();
        stored.lattes = card.lattes.clone();
        if card.foto.is_some() {
            stored.foto = card.foto.clone();
        }
        Ok(true)
    }
}

#[async_trait]
impl AccessStore for MemoryStore {
    async fn grants_for(&self, email: &str) -> Result<Vec<SystemGrant>> {
        Ok(self
            .inner
            .read()
            .await
            .grants
            .iter()
            .filter(|(owner, _)| owner == email)
            .map(|(_, grant)| grant.clone())
            .collect())
    }
}
