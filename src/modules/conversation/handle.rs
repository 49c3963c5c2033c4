use actix_web::{web, HttpRequest};
use uuid::Uuid;

use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::conversation::model::{ConversationSummary, GetOrCreateConversationModel};
use crate::modules::conversation::schema::ConversationEntity;
use crate::modules::conversation::service::ConversationService;
use crate::modules::employer::service::EmployerService;
use crate::modules::session::UserRole;
use crate::modules::worker::service::WorkerService;
use crate::utils::ValidatedJson;

/// Resolves the caller's messaging identity: their profile id on
/// whichever side of the marketplace they are on.
pub(crate) async fn caller_profile_id(
    req: &HttpRequest,
    workers: &WorkerService,
    employers: &EmployerService,
) -> Result<(UserRole, Uuid), error::Error> {
    let claims = get_claims(req)?;
    let profile_id = match claims.role {
        UserRole::Worker => workers
            .get_by_user_id(&claims.sub)
            .await?
            .map(|p| p.id)
            .ok_or_else(|| error::Error::not_found("Worker profile not found"))?,
        UserRole::Employer => employers
            .get_by_user_id(&claims.sub)
            .await?
            .map(|p| p.id)
            .ok_or_else(|| error::Error::not_found("Employer profile not found"))?,
    };
    Ok((claims.role, profile_id))
}

pub async fn list_conversations(
    conversation_service: web::Data<ConversationService>,
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ConversationSummary>>, error::Error> {
    let (role, profile_id) = caller_profile_id(&req, &workers, &employers).await?;
    let conversations = conversation_service.list_for_profile(&profile_id, &role).await?;
    Ok(success::Success::ok(Some(conversations)).message("Conversations retrieved successfully"))
}

pub async fn get_or_create_conversation(
    conversation_service: web::Data<ConversationService>,
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    body: ValidatedJson<GetOrCreateConversationModel>,
    req: HttpRequest,
) -> Result<success::Success<ConversationEntity>, error::Error> {
    let (role, profile_id) = caller_profile_id(&req, &workers, &employers).await?;
    let model = body.0;

    let is_own = match role {
        UserRole::Worker => model.worker_id == profile_id,
        UserRole::Employer => model.employer_id == profile_id,
    };
    if !is_own {
        return Err(error::Error::forbidden("Cannot open a conversation for someone else"));
    }

    let conversation =
        conversation_service.get_or_create(model.worker_id, model.employer_id).await?;
    Ok(success::Success::ok(Some(conversation)).message("Conversation ready"))
}

pub async fn get_conversation(
    conversation_service: web::Data<ConversationService>,
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    conversation_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<ConversationEntity>, error::Error> {
    let (_, profile_id) = caller_profile_id(&req, &workers, &employers).await?;
    let conversation = conversation_service
        .require_participant(&conversation_id.into_inner(), &profile_id)
        .await?;
    Ok(success::Success::ok(Some(conversation)).message("Conversation retrieved successfully"))
}
