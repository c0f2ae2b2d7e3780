use crate::db::NewSubmission;
use crate::domain::schedule::{submission_window, SubmissionWindow};
use crate::domain::scores::DimensionScores;
use crate::domain::submission::{AnswerGroup, AssessmentSubmission};
use crate::error::{ApiError, ApiResult};
use crate::services::assessment;
use crate::state::SharedState;
use crate::time_utils::local_date;
use crate::web::session::AdminSession;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

pub const UNKNOWN_NAME: &str = "Usuário não identificado";
pub const UNKNOWN_ROLE: &str = "N/A";

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct SubmissionStatus {
    pub exists: bool,
    pub next_due_date: NaiveDate,
}

#[derive(Serialize)]
pub struct SubmissionIds {
    pub resposta: Uuid,
    pub analise: Uuid,
}

#[derive(Serialize)]
pub struct StoredAnalysis {
    #[serde(flatten)]
    pub percentages: DimensionScores<i32>,
    pub alerta: String,
    pub dicas: String,
    pub justificativa_ia: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: &'static str,
    pub ids: SubmissionIds,
    pub analise: StoredAnalysis,
    pub porcentagens: DimensionScores<i32>,
    pub alerta: String,
    pub dicas: String,
    pub justificativa: String,
    pub sentimento: &'static str,
    pub respostas_detalhadas: Vec<AnswerGroup>,
}

#[derive(Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub resposta_id: Uuid,
    #[serde(flatten)]
    pub percentages: DimensionScores<i32>,
    pub alerta: String,
    pub dicas: String,
    pub justificativa_ia: String,
    pub sentimento: String,
    pub data_analise: DateTime<Utc>,
    pub nome: String,
    pub cargo: String,
    pub email: String,
    pub desabafo: Option<String>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub analises: Vec<HistoryEntry>,
    pub total: usize,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/respostas", get(submission_status).post(submit))
        .route("/historico-analises", get(history))
        .with_state(state)
}

async fn window_for(state: &SharedState, email: &str) -> ApiResult<SubmissionWindow> {
    let tz = &state.config.timezone;
    let last = state
        .assessments
        .last_submission_at(email)
        .await?
        .map(|at| local_date(tz, at));
    Ok(submission_window(last, local_date(tz, Utc::now())))
}

async fn submission_status(
    State(state): State<SharedState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<SubmissionStatus>> {
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email é obrigatório"))?;

    let window = window_for(&state, email).await?;
    Ok(Json(SubmissionStatus {
        exists: window.already_submitted(),
        next_due_date: window.next_due_date,
    }))
}

async fn submit(
    State(state): State<SharedState>,
    Json(payload): Json<AssessmentSubmission>,
) -> ApiResult<Json<SubmissionResponse>> {
    let email = payload.email.trim().to_string();
    if email.is_empty() {
        return Err(ApiError::bad_request("Email é obrigatório"));
    }

    let window = window_for(&state, &email).await?;
    if window.already_submitted() {
        tracing::info!("Duplicate submission for {} rejected", email);
        return Err(ApiError::Conflict(format!(
            "Você já respondeu o questionário hoje. Próxima resposta em {}",
            window.next_due_date.format("%d/%m/%Y")
        )));
    }

    let defaulted = payload.defaulted_fields();
    if !defaulted.is_empty() {
        tracing::warn!(
            "Submission from {} had unreadable answers scored as 0: {}",
            email,
            defaulted.join(", ")
        );
    }

    let answers = payload.answers();
    let enc_free_text = state
        .crypto
        .seal_optional(&payload.free_text)
        .map_err(|e| anyhow::anyhow!("free text encryption failed: {e}"))?;

    let result = assessment::evaluate(&answers, &payload.free_text);
    let (submission_id, analysis_id) = state
        .assessments
        .insert_assessment(
            &NewSubmission {
                email: email.clone(),
                answers,
                enc_free_text,
            },
            &result,
        )
        .await?;

    tracing::info!(
        "Assessment {} stored for {} (sentiment {}, {} alerts)",
        analysis_id,
        email,
        result.sentiment.as_str(),
        result.alerts.len()
    );

    let alerta = result.alert_text();
    let dicas = result.tip_text();
    let justificativa = result.rationale_text();
    Ok(Json(SubmissionResponse {
        success: true,
        message: "Dados salvos com sucesso no servidor",
        ids: SubmissionIds {
            resposta: submission_id,
            analise: analysis_id,
        },
        analise: StoredAnalysis {
            percentages: result.percentages,
            alerta: alerta.clone(),
            dicas: dicas.clone(),
            justificativa_ia: justificativa.clone(),
        },
        porcentagens: result.percentages,
        alerta,
        dicas,
        justificativa,
        sentimento: result.sentiment.as_str(),
        respostas_detalhadas: payload.detailed_answers(),
    }))
}

async fn history(
    AdminSession(admin): AdminSession,
    State(state): State<SharedState>,
) -> ApiResult<Json<HistoryResponse>> {
    let records = state.assessments.list_analyses().await?;
    let mut people: HashMap<String, (String, String)> = HashMap::new();
    let mut analises = Vec::with_capacity(records.len());

    for record in records {
        if !people.contains_key(&record.email) {
            let person = state
                .directory
                .find_active_by_email(&record.email)
                .await?
                .map(|e| (e.nome, e.cargo.unwrap_or_else(|| UNKNOWN_ROLE.to_string())))
                .unwrap_or_else(|| (UNKNOWN_NAME.to_string(), UNKNOWN_ROLE.to_string()));
            people.insert(record.email.clone(), person);
        }
        let (nome, cargo) = people
            .get(&record.email)
            .cloned()
            .unwrap_or_else(|| (UNKNOWN_NAME.to_string(), UNKNOWN_ROLE.to_string()));

        let desabafo = match record.enc_desabafo.as_deref() {
            Some(sealed) => match state.crypto.decrypt_str(sealed) {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!("Could not decrypt free text of analysis {}: {}", record.id, e);
                    None
                }
            },
            None => None,
        };

        analises.push(HistoryEntry {
            id: record.id,
            resposta_id: record.resposta_id,
            percentages: DimensionScores {
                stress: record.estresse,
                anxiety: record.ansiedade,
                burnout: record.burnout,
                depression: record.depressao,
                balance: record.equilibrio,
                support: record.apoio,
            },
            alerta: record.alerta,
            dicas: record.dicas,
            justificativa_ia: record.justificativa_ia,
            sentimento: record.sentimento,
            data_analise: record.data_analise,
            nome,
            cargo,
            email: record.email,
            desabafo,
        });
    }

    tracing::info!("History of {} analyses served to {}", analises.len(), admin.email);
    Ok(Json(HistoryResponse {
        success: true,
        total: analises.len(),
        analises,
    }))
}
