use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("uploader rejected the photo: {0}")]
    Rejected(String),
}

/// A photo received from the card form.
#[derive(Debug, Clone)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait PhotoUploader: Send + Sync {
    /// Stores the photo and returns the file name to keep in `cartao_digital.foto`.
    async fn upload(&self, cpf: &str, photo: PhotoFile) -> Result<String, UploadError>;
}

/// Forwards card photos to the legacy PHP uploader that serves `PHOTO_BASE_URL`.
pub struct LegacyPhotoUploader {
    client: reqwest::Client,
    endpoint: String,
}

impl LegacyPhotoUploader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl PhotoUploader for LegacyPhotoUploader {
    async fn upload(&self, cpf: &str, photo: PhotoFile) -> Result<String, UploadError> {
        let stored_name = stored_file_name(chrono::Utc::now().timestamp_millis(), &photo.file_name);

        let mut part = reqwest::multipart::Part::bytes(photo.bytes).file_name(stored_name.clone());
        if let Some(mime) = photo.content_type.as_deref() {
            part = part.mime_str(mime)?;
        }
        let form = reqwest::multipart::Form::new()
            .text("cpf", cpf.to_string())
            .part("foto", part);

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let json: serde_json::Value = resp.json().await?;
        if json.get("success").and_then(|v| v.as_bool()) == Some(false) {
            let reason = json
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error");
            return Err(UploadError::Rejected(reason.to_string()));
        }

        let name = ["filename", "arquivo"]
            .iter()
            .find_map(|key| json.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or(stored_name);
        tracing::info!("Photo for card {} stored as {}", cpf, name);
        Ok(name)
    }
}

/// `{millis}-{name}` with path separators and whitespace replaced.
pub fn stored_file_name(millis: i64, original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let safe: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if safe.is_empty() {
        format!("{millis}-foto")
    } else {
        format!("{millis}-{safe}")
    }
}
