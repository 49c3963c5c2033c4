use actix_web::{web, HttpRequest};
use uuid::Uuid;

use crate::api::{error, success};
use crate::middlewares::{bearer_claims, require_role};
use crate::modules::employer::service::EmployerService;
use crate::modules::job::model::{CreateJobModel, JobSearch, JobSearchQuery, UpdateJobModel};
use crate::modules::job::schema::JobEntity;
use crate::modules::job::service::JobService;
use crate::modules::session::UserRole;
use crate::utils::{ValidatedJson, ValidatedQuery};

async fn employer_id_from_request(
    req: &HttpRequest,
    employer_service: &EmployerService,
) -> Result<Uuid, error::Error> {
    let claims = bearer_claims(req)?;
    require_role(&claims, UserRole::Employer)?;
    let profile = employer_service
        .get_by_user_id(&claims.sub)
        .await?
        .ok_or_else(|| error::Error::not_found("Employer profile not found"))?;
    Ok(profile.id)
}

pub async fn list_jobs(
    job_service: web::Data<JobService>,
    query: ValidatedQuery<JobSearchQuery>,
) -> Result<success::Success<Vec<JobEntity>>, error::Error> {
    let q = query.0;
    let search = JobSearch {
        search: q.search.unwrap_or_default(),
        skill: q.skill.filter(|s| !s.trim().is_empty()),
        sort: q.sort.unwrap_or_default(),
    };
    let jobs = job_service.search(search, q.limit, q.offset).await?;
    Ok(success::Success::ok(Some(jobs)).message("Jobs retrieved successfully"))
}

pub async fn get_job(
    job_service: web::Data<JobService>,
    job_id: web::Path<Uuid>,
) -> Result<success::Success<JobEntity>, error::Error> {
    let job = job_service.get_by_id(job_id.into_inner()).await?;
    Ok(success::Success::ok(Some(job)).message("Job retrieved successfully"))
}

pub async fn create_job(
    job_service: web::Data<JobService>,
    employer_service: web::Data<EmployerService>,
    job_data: ValidatedJson<CreateJobModel>,
    req: HttpRequest,
) -> Result<success::Success<JobEntity>, error::Error> {
    let employer_id = employer_id_from_request(&req, &employer_service).await?;
    let job = job_service.create_job(employer_id, job_data.0).await?;
    Ok(success::Success::created(Some(job)).message("Job created successfully"))
}

pub async fn update_job(
    job_service: web::Data<JobService>,
    employer_service: web::Data<EmployerService>,
    job_id: web::Path<Uuid>,
    job_data: ValidatedJson<UpdateJobModel>,
    req: HttpRequest,
) -> Result<success::Success<JobEntity>, error::Error> {
    let employer_id = employer_id_from_request(&req, &employer_service).await?;
    let job = job_service.update_job(&employer_id, job_id.into_inner(), job_data.0).await?;
    Ok(success::Success::ok(Some(job)).message("Job updated successfully"))
}

pub async fn delete_job(
    job_service: web::Data<JobService>,
    employer_service: web::Data<EmployerService>,
    job_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let employer_id = employer_id_from_request(&req, &employer_service).await?;
    job_service.deactivate_job(&employer_id, job_id.into_inner()).await?;
    Ok(success::Success::no_content())
}
