use crate::domain::models::{CardUpsert, DigitalCard, UserRole};
use crate::error::{ApiError, ApiResult};
use crate::services::photo_upload::PhotoFile;
use crate::state::SharedState;
use crate::web::session::{SessionClaims, UserSession};
use axum::{
    extract::{Multipart, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct CardQuery {
    pub cpf: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize)]
pub struct CardResponse {
    pub cartao: Option<DigitalCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto_url: Option<String>,
}

/// Fields of the card form after multipart decoding.
#[derive(Debug, Default)]
struct CardForm {
    card: CardUpsert,
    photo: Option<PhotoFile>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/cartao-digital", get(find_card).post(create_card).put(update_card))
        .with_state(state)
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

async fn find_card(
    State(state): State<SharedState>,
    Query(query): Query<CardQuery>,
) -> ApiResult<Json<CardResponse>> {
    let card = match (non_empty(query.cpf.as_deref()), non_empty(query.email.as_deref())) {
        (Some(cpf), _) => state.cards.find_card_by_cpf(cpf).await?,
        (None, Some(email)) => state.cards.find_card_by_email(email).await?,
        (None, None) => return Err(ApiError::bad_request("CPF ou email obrigatório")),
    };

    let foto_url = card
        .as_ref()
        .and_then(|c| non_empty(c.foto.as_deref()))
        .map(|foto| state.config.photo_url(foto));
    Ok(Json(CardResponse { cartao: card, foto_url }))
}

async fn read_form(mut multipart: Multipart) -> ApiResult<CardForm> {
    let mut form = CardForm::default();
    let invalid = |e: axum::extract::multipart::MultipartError| {
        ApiError::bad_request(format!("Formulário inválido: {e}"))
    };

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "foto" {
            let file_name = field.file_name().unwrap_or("foto").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(invalid)?;
            if !bytes.is_empty() {
                form.photo = Some(PhotoFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(invalid)?;
        let optional = || non_empty(Some(value.as_str())).map(str::to_string);
        let card = &mut form.card;
        match name.as_str() {
            "cpf" => card.cpf = value.trim().to_string(),
            "nome" => card.nome = value.trim().to_string(),
            "email" => card.email = value.trim().to_string(),
            "cargo" => card.cargo = optional(),
            "linkedin" => card.linkedin = optional(),
            "whatsapp" => card.whatsapp = optional(),
            "instagram" => card.instagram = optional(),
            "lattes" => card.lattes = optional(),
            other => tracing::debug!("Ignoring card form field {}", other),
        }
    }

    if form.card.cpf.is_empty() || form.card.nome.is_empty() || form.card.email.is_empty() {
        return Err(ApiError::bad_request("CPF, nome e email são obrigatórios"));
    }
    Ok(form)
}

/// Employees may only edit their own card; admins may edit any.
fn ensure_owner(claims: &SessionClaims, card_email: &str) -> ApiResult<()> {
    if claims.tipo == UserRole::Admin || claims.email.eq_ignore_ascii_case(card_email) {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

async fn store_photo(state: &SharedState, form: &mut CardForm) -> ApiResult<()> {
    if let Some(photo) = form.photo.take() {
        let name = state.uploader.upload(&form.card.cpf, photo).await?;
        form.card.foto = Some(name);
    }
    Ok(())
}

async fn create_card(
    UserSession(claims): UserSession,
    State(state): State<SharedState>,
    multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let mut form = read_form(multipart).await?;
    ensure_owner(&claims, &form.card.email)?;

    if state.cards.find_card_by_cpf(&form.card.cpf).await?.is_some() {
        return Err(ApiError::Conflict("Cartão já cadastrado para este CPF".into()));
    }

    store_photo(&state, &mut form).await?;
    state.cards.insert_card(&form.card).await?;
    tracing::info!("Digital card created for {}", form.card.email);
    Ok(Json(json!({ "ok": true })))
}

async fn update_card(
    UserSession(claims): UserSession,
    State(state): State<SharedState>,
    multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let mut form = read_form(multipart).await?;

    let existing = state
        .cards
        .find_card_by_cpf(&form.card.cpf)
        .await?
        .ok_or_else(|| ApiError::not_found("Cartão não encontrado"))?;
    ensure_owner(&claims, &existing.email)?;
    ensure_owner(&claims, &form.card.email)?;

    store_photo(&state, &mut form).await?;
    if !state.cards.update_card(&form.card).await? {
        return Err(ApiError::not_found("Cartão não encontrado"));
    }
    tracing::info!("Digital card updated for {}", form.card.email);
    Ok(Json(json!({ "ok": true })))
}
