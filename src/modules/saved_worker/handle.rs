use actix_web::{web, HttpRequest};
use uuid::Uuid;

use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::employer::service::EmployerService;
use crate::modules::saved_worker::service::SavedWorkerService;
use crate::modules::worker::schema::WorkerProfileEntity;

async fn employer_id(
    req: &HttpRequest,
    employer_service: &EmployerService,
) -> Result<Uuid, error::Error> {
    let claims = get_claims(req)?;
    let profile = employer_service
        .get_by_user_id(&claims.sub)
        .await?
        .ok_or_else(|| error::Error::not_found("Employer profile not found"))?;
    Ok(profile.id)
}

pub async fn list_saved_workers(
    saved_service: web::Data<SavedWorkerService>,
    employer_service: web::Data<EmployerService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<WorkerProfileEntity>>, error::Error> {
    let employer_id = employer_id(&req, &employer_service).await?;
    let workers = saved_service.list_saved(&employer_id).await?;
    Ok(success::Success::ok(Some(workers)).message("Saved workers retrieved successfully"))
}

pub async fn save_worker(
    saved_service: web::Data<SavedWorkerService>,
    employer_service: web::Data<EmployerService>,
    worker_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let employer_id = employer_id(&req, &employer_service).await?;
    saved_service.save(&employer_id, &worker_id.into_inner()).await?;
    Ok(success::Success::ok(None).message("Worker saved"))
}

pub async fn unsave_worker(
    saved_service: web::Data<SavedWorkerService>,
    employer_service: web::Data<EmployerService>,
    worker_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let employer_id = employer_id(&req, &employer_service).await?;
    saved_service.unsave(&employer_id, &worker_id.into_inner()).await?;
    Ok(success::Success::no_content())
}
