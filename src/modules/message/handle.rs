use actix_web::{web, HttpRequest};
use serde::Serialize;
use uuid::Uuid;

use crate::api::{error, success};
use crate::modules::conversation::handle::caller_profile_id;
use crate::modules::employer::service::EmployerService;
use crate::modules::message::model::SendMessageModel;
use crate::modules::message::schema::MessageEntity;
use crate::modules::message::service::MessageService;
use crate::modules::worker::service::WorkerService;
use crate::utils::ValidatedJson;

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}

pub async fn get_messages(
    message_service: web::Data<MessageService>,
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    conversation_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<Vec<MessageEntity>>, error::Error> {
    let (_, profile_id) = caller_profile_id(&req, &workers, &employers).await?;
    let messages = message_service
        .history(&conversation_id.into_inner(), &profile_id)
        .await?;
    Ok(success::Success::ok(Some(messages)).message("Messages retrieved successfully"))
}

pub async fn send_message(
    message_service: web::Data<MessageService>,
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    conversation_id: web::Path<Uuid>,
    body: ValidatedJson<SendMessageModel>,
    req: HttpRequest,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let (_, profile_id) = caller_profile_id(&req, &workers, &employers).await?;
    let message = message_service
        .send_message(&conversation_id.into_inner(), &profile_id, &body.0.content)
        .await?;
    Ok(success::Success::created(Some(message)).message("Message sent"))
}

pub async fn mark_read(
    message_service: web::Data<MessageService>,
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    conversation_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<MarkReadResponse>, error::Error> {
    let (_, profile_id) = caller_profile_id(&req, &workers, &employers).await?;
    let updated = message_service
        .mark_read(&conversation_id.into_inner(), &profile_id)
        .await?;
    Ok(success::Success::ok(Some(MarkReadResponse { updated })).message("Conversation marked as read"))
}
