use serde::Serialize;

use crate::constants::{ALLOWED_AVATAR_TYPES, MAX_AVATAR_BYTES};

/// Avatar storage configuration.
#[derive(Debug, Clone)]
pub struct AvatarConfig {
    pub max_bytes: usize,
    pub allowed_mime_types: Vec<String>,
    pub upload_dir: String,
    pub base_url: String,
}

impl AvatarConfig {
    pub fn new(upload_dir: String, base_url: String) -> Self {
        Self {
            max_bytes: MAX_AVATAR_BYTES,
            allowed_mime_types: ALLOWED_AVATAR_TYPES.iter().map(|s| s.to_string()).collect(),
            upload_dir,
            base_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}
