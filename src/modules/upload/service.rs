use std::path::Path;
use log::info;
use uuid::Uuid;

use crate::api::error;
use crate::modules::upload::model::{AvatarConfig, UploadResponse};

/// Writes avatar images to local disk and hands back a public URL. The
/// URL only becomes visible on a profile once the client saves it
/// through a profile update.
#[derive(Clone)]
pub struct AvatarStorage {
    config: AvatarConfig,
}

impl AvatarStorage {
    pub fn new(config: AvatarConfig) -> Self {
        info!("AvatarStorage initialized at {}", config.upload_dir);
        Self { config }
    }

    fn validate(&self, size: usize, mime_type: &str) -> Result<(), error::SystemError> {
        if size > self.config.max_bytes {
            return Err(error::SystemError::validation(format!(
                "Avatar exceeds maximum allowed size of {} bytes",
                self.config.max_bytes
            )));
        }
        if !self.config.allowed_mime_types.iter().any(|t| t == mime_type) {
            return Err(error::SystemError::validation(format!(
                "File type '{}' is not allowed for avatars",
                mime_type
            )));
        }
        Ok(())
    }

    fn filename_for(&self, user_id: &Uuid, original_filename: &str) -> String {
        let extension = Path::new(original_filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("bin");
        let unique = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        format!("{}-{}.{}", user_id, unique, extension)
    }

    pub async fn store_avatar(
        &self,
        user_id: &Uuid,
        original_filename: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, error::SystemError> {
        self.validate(bytes.len(), mime_type)?;

        let filename = self.filename_for(user_id, original_filename);

        tokio::fs::create_dir_all(&self.config.upload_dir).await?;
        let file_path = format!("{}/{}", self.config.upload_dir, filename);
        tokio::fs::write(&file_path, bytes).await?;

        let url = format!("{}/{}", self.config.base_url, filename);
        Ok(UploadResponse { url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> AvatarStorage {
        AvatarStorage::new(AvatarConfig::new(
            std::env::temp_dir().join("avatar-test").to_string_lossy().into_owned(),
            "/uploads".to_string(),
        ))
    }

    #[test]
    fn test_rejects_oversized_file() {
        let storage = storage();
        let err = storage.validate(crate::constants::MAX_AVATAR_BYTES + 1, "image/png");
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_disallowed_mime_type() {
        let storage = storage();
        assert!(storage.validate(10, "application/pdf").is_err());
        assert!(storage.validate(10, "image/png").is_ok());
    }

    #[test]
    fn test_filename_keeps_extension_and_owner() {
        let storage = storage();
        let user_id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let name = storage.filename_for(&user_id, "me.PNG");
        assert!(name.starts_with(&user_id.to_string()));
        assert!(name.ends_with(".PNG"));
    }
}
