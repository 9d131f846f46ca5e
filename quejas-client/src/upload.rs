//! Image Upload Pipeline
//!
//! `Idle → Validating → RequestingUrl → Uploading → Done`, with `Failed`
//! reachable from every step. Validation happens locally before any network
//! call. The object is then PUT straight to storage through a presigned URL,
//! without the API credential.
//!
//! Progress is reported at three checkpoints (10, 50, 100), not per byte.

use chrono::Utc;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::presign::Presigner;
use crate::transport::{HttpRequest, HttpTransport, Method, RequestBody, Url};

/// Prefix of every uploaded object key
pub const KEY_PREFIX: &str = "quejas-siclo";

/// Default maximum upload size in megabytes
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

/// Default accepted MIME types
pub const DEFAULT_ALLOWED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Progress checkpoints
pub const PROGRESS_VALIDATED: u8 = 10;
pub const PROGRESS_URL_READY: u8 = 50;
pub const PROGRESS_DONE: u8 = 100;

/// Upload limits
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOptions {
    pub max_file_size_mb: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UploadOptions {
    pub fn max_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStage {
    #[default]
    Idle,
    Validating,
    RequestingUrl,
    Uploading,
    Done,
    Failed,
}

/// Observable state of the uploader
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadStatus {
    pub stage: UploadStage,
    pub progress: u8,
    pub error: Option<String>,
    pub url: Option<String>,
}

/// A file ready to upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ClientError::validation(format!("Ruta sin nombre de archivo: {}", path.display())))?;

        Ok(Self {
            content_type: mime_from_extension(path).to_string(),
            name,
            data,
        })
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// MIME type for a path's extension
pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Check size and type against the limits
pub fn validate_file(file: &UploadFile, options: &UploadOptions) -> ClientResult<()> {
    if file.size() > options.max_bytes() {
        return Err(ClientError::validation(format!(
            "El archivo {} excede el tamaño máximo de {}MB",
            file.name, options.max_file_size_mb
        )));
    }

    if !options.allowed_types.iter().any(|t| t == &file.content_type) {
        return Err(ClientError::validation(format!(
            "Tipo de archivo no permitido: {}. Tipos permitidos: {}",
            file.content_type,
            options.allowed_types.join(", ")
        )));
    }

    Ok(())
}

/// Replace anything outside `[A-Za-z0-9.-]` with `_`
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

/// Object key for a file uploaded at `timestamp_ms`
pub fn storage_key(file_name: &str, timestamp_ms: i64) -> String {
    format!("{}/{}-{}", KEY_PREFIX, timestamp_ms, sanitize_filename(file_name))
}

/// Result for one file of a batch
#[derive(Debug)]
pub struct UploadOutcome {
    pub file_name: String,
    pub result: ClientResult<String>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Validates, presigns and uploads files
pub struct ImageUploader {
    presigner: Arc<dyn Presigner>,
    transport: Arc<dyn HttpTransport>,
    options: UploadOptions,
    image_domain: String,
    status: RwLock<UploadStatus>,
}

impl ImageUploader {
    pub fn new(
        presigner: Arc<dyn Presigner>,
        transport: Arc<dyn HttpTransport>,
        options: UploadOptions,
        image_domain: impl Into<String>,
    ) -> Self {
        Self {
            presigner,
            transport,
            options,
            image_domain: image_domain.into(),
            status: RwLock::new(UploadStatus::default()),
        }
    }

    pub fn options(&self) -> &UploadOptions {
        &self.options
    }

    /// Snapshot of the current upload
    pub fn status(&self) -> UploadStatus {
        self.status.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn reset(&self) {
        *self.write() = UploadStatus::default();
    }

    fn write(&self) -> RwLockWriteGuard<'_, UploadStatus> {
        self.status.write().unwrap_or_else(|e| e.into_inner())
    }

    fn enter(&self, stage: UploadStage) {
        self.write().stage = stage;
    }

    fn advance<F: FnMut(u8)>(&self, progress: u8, on_progress: &mut F) {
        self.write().progress = progress;
        on_progress(progress);
    }

    fn fail(&self, file_name: &str, err: ClientError) -> ClientError {
        warn!(file = file_name, error = %err, "Upload failed");
        let mut status = self.write();
        status.stage = UploadStage::Failed;
        status.error = Some(err.message());
        err
    }

    /// Public URL an object will be served from
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.image_domain.trim_end_matches('/'), key)
    }

    /// Upload one file, returning its public URL
    pub async fn upload<F: FnMut(u8)>(&self, file: &UploadFile, mut on_progress: F) -> ClientResult<String> {
        *self.write() = UploadStatus {
            stage: UploadStage::Validating,
            ..Default::default()
        };

        if let Err(e) = validate_file(file, &self.options) {
            return Err(self.fail(&file.name, e));
        }
        self.advance(PROGRESS_VALIDATED, &mut on_progress);

        self.enter(UploadStage::RequestingUrl);
        let key = storage_key(&file.name, Utc::now().timestamp_millis());
        let presigned = match self
            .presigner
            .presign_put(&key, &file.name, &file.content_type)
            .await
        {
            Ok(presigned) => presigned,
            Err(e) => return Err(self.fail(&file.name, e)),
        };
        self.advance(PROGRESS_URL_READY, &mut on_progress);

        self.enter(UploadStage::Uploading);
        if let Err(e) = self.put_object(&presigned.url, file).await {
            return Err(self.fail(&file.name, e));
        }

        let url = self.public_url(&key);
        {
            let mut status = self.write();
            status.stage = UploadStage::Done;
            status.url = Some(url.clone());
        }
        self.advance(PROGRESS_DONE, &mut on_progress);

        info!(file = %file.name, key = %key, size = file.size(), "Upload complete");
        Ok(url)
    }

    async fn put_object(&self, presigned_url: &str, file: &UploadFile) -> ClientResult<()> {
        let url = Url::parse(presigned_url)
            .map_err(|e| ClientError::upload(format!("Invalid presigned URL: {}", e)))?;

        let request = HttpRequest::new(Method::PUT, url).with_body(RequestBody::Bytes {
            content_type: file.content_type.clone(),
            data: file.data.clone(),
        });

        debug!(file = %file.name, size = file.size(), "Uploading to storage");
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ClientError::upload(format!(
                "Storage rejected upload with status {}",
                response.status
            )));
        }
        Ok(())
    }

    /// Upload files one after another; a failure does not stop the rest
    pub async fn upload_many<F: FnMut(usize, u8)>(
        &self,
        files: &[UploadFile],
        mut on_progress: F,
    ) -> Vec<UploadOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            let result = self.upload(file, |p| on_progress(index, p)).await;
            outcomes.push(UploadOutcome {
                file_name: file.name.clone(),
                result,
            });
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(total = files.len(), failed = failed, "Batch upload finished");
        outcomes
    }
}
