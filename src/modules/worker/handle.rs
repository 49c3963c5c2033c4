use actix_web::{get, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::modules::worker::{model::WorkerSearchQuery, schema::WorkerProfileEntity, service::WorkerService};
use crate::utils::ValidatedQuery;

#[get("")]
pub async fn search_workers(
    worker_service: web::Data<WorkerService>,
    query: ValidatedQuery<WorkerSearchQuery>,
) -> Result<success::Success<Vec<WorkerProfileEntity>>, error::Error> {
    let (filter, limit, offset) = query.0.into_filter();
    let workers = worker_service.search(filter, limit, offset).await?;
    Ok(success::Success::ok(Some(workers)).message("Workers retrieved successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_worker(
    worker_service: web::Data<WorkerService>,
    worker_id: web::Path<Uuid>,
) -> Result<success::Success<WorkerProfileEntity>, error::Error> {
    let worker = worker_service.get_by_id(worker_id.into_inner()).await?;
    Ok(success::Success::ok(Some(worker)).message("Worker retrieved successfully"))
}
