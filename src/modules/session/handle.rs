use actix_web::{web, HttpRequest};

use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::employer::model::{CreateEmployerProfileModel, UpdateEmployerProfileModel};
use crate::modules::employer::schema::EmployerProfileEntity;
use crate::modules::employer::service::EmployerService;
use crate::modules::saved_worker::service::SavedWorkerService;
use crate::modules::session::context::{SessionContext, SessionResponse};
use crate::modules::worker::model::{CreateWorkerProfileModel, UpdateWorkerProfileModel};
use crate::modules::worker::schema::WorkerProfileEntity;
use crate::modules::worker::service::WorkerService;
use crate::utils::ValidatedJson;

async fn load_session(
    req: &HttpRequest,
    workers: &web::Data<WorkerService>,
    employers: &web::Data<EmployerService>,
    saved: &web::Data<SavedWorkerService>,
) -> Result<SessionContext, error::Error> {
    let claims = get_claims(req)?;
    let ctx = SessionContext::load(
        claims.sub,
        claims.role,
        workers.get_ref().clone(),
        employers.get_ref().clone(),
        saved.get_ref().clone(),
    )
    .await?;
    Ok(ctx)
}

pub async fn get_session(
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    saved: web::Data<SavedWorkerService>,
    req: HttpRequest,
) -> Result<success::Success<SessionResponse>, error::Error> {
    let ctx = load_session(&req, &workers, &employers, &saved).await?;
    Ok(success::Success::ok(Some(ctx.into_response())).message("Session retrieved successfully"))
}

pub async fn create_worker_profile(
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    saved: web::Data<SavedWorkerService>,
    profile_data: ValidatedJson<CreateWorkerProfileModel>,
    req: HttpRequest,
) -> Result<success::Success<WorkerProfileEntity>, error::Error> {
    let mut ctx = load_session(&req, &workers, &employers, &saved).await?;
    let profile = ctx.create_worker_profile(profile_data.0).await?;
    Ok(success::Success::created(Some(profile)).message("Worker profile created successfully"))
}

pub async fn update_worker_profile(
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    saved: web::Data<SavedWorkerService>,
    profile_data: ValidatedJson<UpdateWorkerProfileModel>,
    req: HttpRequest,
) -> Result<success::Success<WorkerProfileEntity>, error::Error> {
    let mut ctx = load_session(&req, &workers, &employers, &saved).await?;
    let profile = ctx.update_worker_profile(profile_data.0).await?;
    Ok(success::Success::ok(Some(profile)).message("Worker profile updated successfully"))
}

pub async fn create_employer_profile(
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    saved: web::Data<SavedWorkerService>,
    profile_data: ValidatedJson<CreateEmployerProfileModel>,
    req: HttpRequest,
) -> Result<success::Success<EmployerProfileEntity>, error::Error> {
    let mut ctx = load_session(&req, &workers, &employers, &saved).await?;
    let profile = ctx.create_employer_profile(profile_data.0).await?;
    Ok(success::Success::created(Some(profile)).message("Employer profile created successfully"))
}

pub async fn update_employer_profile(
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
    saved: web::Data<SavedWorkerService>,
    profile_data: ValidatedJson<UpdateEmployerProfileModel>,
    req: HttpRequest,
) -> Result<success::Success<EmployerProfileEntity>, error::Error> {
    let mut ctx = load_session(&req, &workers, &employers, &saved).await?;
    let profile = ctx.update_employer_profile(profile_data.0).await?;
    Ok(success::Success::ok(Some(profile)).message("Employer profile updated successfully"))
}
