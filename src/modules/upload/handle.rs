use actix_multipart::Multipart;
use actix_web::{web, HttpRequest};
use futures_util::TryStreamExt;

use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::upload::model::UploadResponse;
use crate::modules::upload::service::AvatarStorage;

pub async fn upload_avatar(
    mut payload: Multipart,
    req: HttpRequest,
    storage: web::Data<AvatarStorage>,
) -> Result<success::Success<UploadResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;

    if let Some(mut field) = payload.try_next().await.map_err(|_| error::Error::InternalServer)? {
        let content_disposition = field
            .content_disposition()
            .ok_or_else(|| error::Error::bad_request("Missing content disposition"))?;

        let filename = content_disposition
            .get_filename()
            .ok_or_else(|| error::Error::bad_request("Missing filename"))?
            .to_string();

        // Trust the declared content type when present, otherwise guess
        // from the filename.
        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| mime_guess::from_path(&filename).first_or_octet_stream().to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|_| error::Error::InternalServer)? {
            bytes.extend_from_slice(&chunk);
        }

        let result = storage.store_avatar(&user_id, &filename, &mime_type, &bytes).await?;
        return Ok(success::Success::ok(Some(result)).message("Avatar uploaded successfully"));
    }

    Err(error::Error::bad_request("No file found in request"))
}
