use actix_web::{get, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::modules::employer::{schema::EmployerProfileEntity, service::EmployerService};

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_employer(
    employer_service: web::Data<EmployerService>,
    employer_id: web::Path<Uuid>,
) -> Result<success::Success<EmployerProfileEntity>, error::Error> {
    let employer = employer_service.get_by_id(employer_id.into_inner()).await?;
    Ok(success::Success::ok(Some(employer)).message("Employer retrieved successfully"))
}
