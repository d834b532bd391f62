use serde::Serialize;

use super::repo::Image;

/// Response for a batch upload. `failed` is present only when at least one
/// file could not be stored; the successes stand regardless.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub images: Vec<Image>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedUpload>,
}

/// One file the batch could not store.
#[derive(Debug, Serialize)]
pub struct FailedUpload {
    pub original_name: String,
    pub reason: String,
}
