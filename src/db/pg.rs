use super::{AccessStore, AssessmentStore, CardStore, DirectoryStore, NewSubmission};
use crate::domain::models::{AnalysisRecord, CardUpsert, DigitalCard, Employee, SystemGrant};
use crate::services::assessment::Assessment;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Employee columns joined with the names of every organisational unit.
const EMPLOYEE_SELECT: &str = r#"
    SELECT
        c.id,
        c.nome,
        c.email,
        c.cargo,
        c.telefone,
        c.chapa,
        c.cpf,
        c.tipo,
        c.regional_id,
        c.departamento_id,
        c.divisao_id,
        c.assessoria_id,
        c.fazenda_id,
        c.diretoria_id,
        c.gabinete_id,
        r.nome_regional       AS regional_nome,
        d.nome_departamento   AS departamento_nome,
        dv.nome_divisao       AS divisao_nome,
        a.nome_assessoria     AS assessoria_nome,
        f.nome_fazenda        AS fazenda_nome,
        dir.nome_diretoria    AS diretoria_nome,
        g.nome_gabinete       AS gabinete_nome
    FROM colaboradores c
    LEFT JOIN regional r       ON c.regional_id = r.id
    LEFT JOIN departamentos d  ON c.departamento_id = d.id
    LEFT JOIN divisao dv       ON c.divisao_id = dv.id
    LEFT JOIN assessoria a     ON c.assessoria_id = a.id
    LEFT JOIN fazenda f        ON c.fazenda_id = f.id
    LEFT JOIN diretoria dir    ON c.diretoria_id = dir.id
    LEFT JOIN gabinete g       ON c.gabinete_id = g.id
"#;

const CARD_SELECT: &str = r#"
    SELECT id, cpf, nome, email, cargo, foto, linkedin, whatsapp, instagram, lattes
    FROM cartao_digital
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentStore for PgStore {
    async fn last_submission_at(&self, email: &str) -> Result<Option<DateTime<Utc>>> {
        let last = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT data_resposta
            FROM respostas
            WHERE email = $1
            ORDER BY data_resposta DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(last)
    }

    async fn insert_assessment(
        &self,
        submission: &NewSubmission,
        assessment: &Assessment,
    ) -> Result<(Uuid, Uuid)> {
        let a = &submission.answers;
        let mut tx = self.pool.begin().await?;

        let submission_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO respostas (
                email, data_resposta,
                estresse1, estresse2, ansiedade1, ansiedade2,
                burnout1, burnout2, depressao1, depressao2,
                equilibrio, apoio, enc_desabafo
            )
            VALUES ($1, NOW(), $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(&submission.email)
        .bind(a.stress[0])
        .bind(a.stress[1])
        .bind(a.anxiety[0])
        .bind(a.anxiety[1])
        .bind(a.burnout[0])
        .bind(a.burnout[1])
        .bind(a.depression[0])
        .bind(a.depression[1])
        .bind(a.balance)
        .bind(a.support)
        .bind(&submission.enc_free_text)
        .fetch_one(&mut *tx)
        .await?;

        let p = &assessment.percentages;
        let analysis_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO analises (
                resposta_id, estresse, ansiedade, burnout, depressao,
                equilibrio, apoio, alerta, dicas, justificativa_ia, sentimento, data_analise
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
            RETURNING id
            "#,
        )
        .bind(submission_id)
        .bind(p.stress)
        .bind(p.anxiety)
        .bind(p.burnout)
        .bind(p.depression)
        .bind(p.balance)
        .bind(p.support)
        .bind(assessment.alert_text())
        .bind(assessment.tip_text())
        .bind(assessment.rationale_text())
        .bind(assessment.sentiment.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((submission_id, analysis_id))
    }

    async fn list_analyses(&self) -> Result<Vec<AnalysisRecord>> {
        let rows = sqlx::query_as::<_, AnalysisRecord>(
            r#"
            SELECT
                an.id,
                an.resposta_id,
                r.email,
                r.enc_desabafo,
                an.estresse,
                an.ansiedade,
                an.burnout,
                an.depressao,
                an.equilibrio,
                an.apoio,
                an.alerta,
                an.dicas,
                an.justificativa_ia,
                an.sentimento,
                an.data_analise
            FROM analises an
            JOIN respostas r ON r.id = an.resposta_id
            ORDER BY an.data_analise DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl DirectoryStore for PgStore {
    async fn list_directory(&self) -> Result<Vec<Employee>> {
        let sql = format!(
            "{EMPLOYEE_SELECT} WHERE c.status <> 0 AND COALESCE(c.telefone, '') <> '' ORDER BY c.nome ASC"
        );
        let rows = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<Employee>> {
        let sql = format!("{EMPLOYEE_SELECT} WHERE c.email = $1 AND c.status = 1 LIMIT 1");
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_active_by_credentials(&self, chapa: &str, cpf: &str) -> Result<Option<Employee>> {
        let sql = format!(
            "{EMPLOYEE_SELECT} WHERE c.chapa = $1 \
             AND regexp_replace(c.cpf, '[^0-9]', '', 'g') = $2 \
             AND c.status = 1 LIMIT 1"
        );
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(chapa)
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM colaboradores WHERE LOWER(email) = $1)",
        )
        .bind(email.trim().to_lowercase())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn update_phone(&self, email: &str, phone: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE colaboradores
            SET telefone = $1
            WHERE email = $2 AND status <> 0
            "#,
        )
        .bind(phone)
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CardStore for PgStore {
    async fn find_card_by_cpf(&self, cpf: &str) -> Result<Option<DigitalCard>> {
        let sql = format!("{CARD_SELECT} WHERE cpf = $1 LIMIT 1");
        let card = sqlx::query_as::<_, DigitalCard>(&sql)
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await?;
        Ok(card)
    }

    async fn find_card_by_email(&self, email: &str) -> Result<Option<DigitalCard>> {
        let sql = format!("{CARD_SELECT} WHERE email = $1 LIMIT 1");
        let card = sqlx::query_as::<_, DigitalCard>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(card)
    }

    async fn insert_card(&self, card: &CardUpsert) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cartao_digital (cpf, nome, email, cargo, foto, linkedin, whatsapp, instagram, lattes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&card.cpf)
        .bind(&card.nome)
        .bind(&card.email)
        .bind(&card.cargo)
        .bind(&card.foto)
        .bind(&card.linkedin)
        .bind(&card.whatsapp)
        .bind(&card.instagram)
        .bind(&card.lattes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_card(&self, card: &CardUpsert) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE cartao_digital
            SET nome = $2,
                email = $3,
                cargo = $4,
                linkedin = $5,
                whatsapp = $6,
                instagram = $7,
                lattes = $8,
                foto = COALESCE($9, foto)
            WHERE cpf = $1
            "#,
        )
        .bind(&card.cpf)
        .bind(&card.nome)
        .bind(&card.email)
        .bind(&card.cargo)
        .bind(&card.linkedin)
        .bind(&card.whatsapp)
        .bind(&card.instagram)
        .bind(&card.lattes)
        .bind(&card.foto)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AccessStore for PgStore {
    async fn grants_for(&self, email: &str) -> Result<Vec<SystemGrant>> {
        let grants = sqlx::query_as::<_, SystemGrant>(
            r#"
            SELECT sistema, tipo
            FROM usuario_sistemas
            WHERE email_institucional = $1
            ORDER BY sistema, tipo
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(grants)
    }
}
