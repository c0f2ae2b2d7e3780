use crate::domain::contact::{is_valid_phone, sanitize_phone};
use crate::domain::models::{Employee, OrgUnits};
use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;
use crate::web::session::UserSession;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct EmailBody {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct PhoneBody {
    #[serde(default)]
    pub telefone: String,
}

#[derive(Serialize)]
pub struct UnitName {
    pub nome: String,
}

#[derive(Serialize)]
pub struct Unit {
    pub id: Option<i64>,
    pub nome: Option<String>,
}

/// Employee summary with org units reduced to their names.
#[derive(Serialize)]
pub struct EmployeeDetails {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub cargo: Option<String>,
    #[serde(flatten)]
    pub units: OrgUnits<Option<UnitName>>,
}

/// The signed-in employee's own record, units with ids.
#[derive(Serialize)]
pub struct FullProfile {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub cargo: Option<String>,
    pub telefone: String,
    #[serde(flatten)]
    pub units: OrgUnits<Unit>,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/consulta-ramal", get(list_directory))
        .route("/usuario-detalhes", post(employee_details))
        .route("/usuario-completo", get(full_profile))
        .route("/usuario", get(email_exists))
        .route("/update-telefone", post(update_phone))
        .with_state(state)
}

async fn list_directory(State(state): State<SharedState>) -> ApiResult<Json<Vec<Employee>>> {
    let mut employees = state.directory.list_directory().await?;
    for employee in &mut employees {
        employee.telefone = Some(sanitize_phone(employee.telefone.as_deref()));
    }
    tracing::debug!("Directory lookup returned {} employees", employees.len());
    Ok(Json(employees))
}

async fn employee_details(
    State(state): State<SharedState>,
    Json(body): Json<EmailBody>,
) -> ApiResult<Json<Value>> {
    let email = body.email.trim();
    if email.is_empty() {
        return Err(ApiError::bad_request("E-mail é obrigatório"));
    }

    let employee = state
        .directory
        .find_active_by_email(email)
        .await?
        .ok_or_else(|| ApiError::not_found("Colaborador não encontrado"))?;

    let details = EmployeeDetails {
        id: employee.id,
        nome: employee.nome.clone(),
        email: employee.email.clone(),
        telefone: sanitize_phone(employee.telefone.as_deref()),
        cargo: employee.cargo.clone(),
        units: employee.org_units(|_, nome| {
            nome.filter(|n| !n.is_empty()).map(|n| UnitName { nome: n.to_string() })
        }),
    };
    Ok(Json(json!({ "success": true, "colaborador": details })))
}

async fn full_profile(
    UserSession(claims): UserSession,
    State(state): State<SharedState>,
) -> ApiResult<Json<Value>> {
    let employee = state
        .directory
        .find_active_by_email(&claims.email)
        .await?
        .ok_or_else(|| ApiError::not_found("Usuário não encontrado"))?;

    let profile = FullProfile {
        id: employee.id,
        nome: employee.nome.clone(),
        email: employee.email.clone(),
        cargo: employee.cargo.clone(),
        telefone: sanitize_phone(employee.telefone.as_deref()),
        units: employee.org_units(|id, nome| Unit {
            id,
            nome: nome.map(str::to_string),
        }),
    };
    Ok(Json(json!({ "success": true, "usuario": profile })))
}

async fn email_exists(
    State(state): State<SharedState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<Value>> {
    let email = query.email.unwrap_or_default();
    if email.trim().is_empty() {
        return Ok(Json(json!({ "exists": false })));
    }
    let exists = state.directory.email_exists(&email).await?;
    Ok(Json(json!({ "exists": exists })))
}

async fn update_phone(
    UserSession(claims): UserSession,
    State(state): State<SharedState>,
    Json(body): Json<PhoneBody>,
) -> ApiResult<Json<Value>> {
    let telefone = body.telefone.trim();
    if telefone.is_empty() {
        return Err(ApiError::bad_request("Telefone é obrigatório"));
    }
    if !is_valid_phone(telefone) {
        return Err(ApiError::bad_request(
            "Telefone inválido. Use formato (XX) XXXX-XXXX ou (XX) XXXXX-XXXX",
        ));
    }

    if !state.directory.update_phone(&claims.email, telefone).await? {
        return Err(ApiError::not_found("Usuário não encontrado"));
    }

    tracing::info!("Phone updated for {}", claims.email);
    Ok(Json(json!({
        "success": true,
        "message": "Telefone atualizado com sucesso",
        "telefone": telefone,
    })))
}
