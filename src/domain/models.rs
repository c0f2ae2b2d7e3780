use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Colaborador,
}

impl UserRole {
    /// `tipo` column values other than `admin` are regular employees.
    pub fn from_tipo(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_lowercase()) {
            Some(t) if t == "admin" => UserRole::Admin,
            _ => UserRole::Colaborador,
        }
    }
}

/// Employee row joined with the names of its organisational units. Login
/// credentials and role are never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default)]
pub struct Employee {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub cargo: Option<String>,
    pub telefone: Option<String>,
    #[serde(skip_serializing)]
    pub chapa: Option<String>,
    #[serde(skip_serializing)]
    pub cpf: Option<String>,
    #[serde(skip_serializing)]
    pub tipo: Option<String>,
    pub regional_id: Option<i64>,
    pub departamento_id: Option<i64>,
    pub divisao_id: Option<i64>,
    pub assessoria_id: Option<i64>,
    pub fazenda_id: Option<i64>,
    pub diretoria_id: Option<i64>,
    pub gabinete_id: Option<i64>,
    pub regional_nome: Option<String>,
    pub departamento_nome: Option<String>,
    pub divisao_nome: Option<String>,
    pub assessoria_nome: Option<String>,
    pub fazenda_nome: Option<String>,
    pub diretoria_nome: Option<String>,
    pub gabinete_nome: Option<String>,
}

impl Employee {
    pub fn role(&self) -> UserRole {
        UserRole::from_tipo(self.tipo.as_deref())
    }

    /// Builds one value per organisational unit from its id and joined name.
    pub fn org_units<T>(&self, unit: impl Fn(Option<i64>, Option<&str>) -> T) -> OrgUnits<T> {
        OrgUnits {
            regional: unit(self.regional_id, self.regional_nome.as_deref()),
            departamento: unit(self.departamento_id, self.departamento_nome.as_deref()),
            divisao: unit(self.divisao_id, self.divisao_nome.as_deref()),
            assessoria: unit(self.assessoria_id, self.assessoria_nome.as_deref()),
            fazenda: unit(self.fazenda_id, self.fazenda_nome.as_deref()),
            diretoria: unit(self.diretoria_id, self.diretoria_nome.as_deref()),
            gabinete: unit(self.gabinete_id, self.gabinete_nome.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrgUnits<T> {
    pub regional: T,
    pub departamento: T,
    pub divisao: T,
    pub assessoria: T,
    pub fazenda: T,
    pub diretoria: T,
    pub gabinete: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default, PartialEq)]
pub struct DigitalCard {
    pub id: i64,
    pub cpf: String,
    pub nome: String,
    pub email: String,
    pub cargo: Option<String>,
    pub foto: Option<String>,
    pub linkedin: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub lattes: Option<String>,
}

/// Card fields as submitted by the form. `foto` is only set when a new
/// photo was uploaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpsert {
    pub cpf: String,
    pub nome: String,
    pub email: String,
    pub cargo: Option<String>,
    pub foto: Option<String>,
    pub linkedin: Option<String>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub lattes: Option<String>,
}

/// Stored analysis joined with the submission it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub resposta_id: Uuid,
    pub email: String,
    pub enc_desabafo: Option<String>,
    pub estresse: i32,
    pub ansiedade: i32,
    pub burnout: i32,
    pub depressao: i32,
    pub equilibrio: i32,
    pub apoio: i32,
    pub alerta: String,
    pub dicas: String,
    pub justificativa_ia: String,
    pub sentimento: String,
    pub data_analise: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SystemGrant {
    pub sistema: String,
    pub tipo: Option<String>,
}
