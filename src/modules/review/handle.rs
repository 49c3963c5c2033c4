use actix_web::{web, HttpRequest};
use uuid::Uuid;

use crate::api::{error, success};
use crate::middlewares::{bearer_claims, require_role};
use crate::modules::employer::service::EmployerService;
use crate::modules::review::model::{CreateReviewModel, ReviewResponse};
use crate::modules::review::schema::ReviewEntity;
use crate::modules::review::service::ReviewService;
use crate::modules::session::UserRole;
use crate::utils::ValidatedJson;

pub async fn list_worker_reviews(
    review_service: web::Data<ReviewService>,
    worker_id: web::Path<Uuid>,
) -> Result<success::Success<Vec<ReviewResponse>>, error::Error> {
    let reviews = review_service.list_for_worker(worker_id.into_inner()).await?;
    Ok(success::Success::ok(Some(reviews)).message("Reviews retrieved successfully"))
}

pub async fn create_worker_review(
    review_service: web::Data<ReviewService>,
    employer_service: web::Data<EmployerService>,
    worker_id: web::Path<Uuid>,
    review_data: ValidatedJson<CreateReviewModel>,
    req: HttpRequest,
) -> Result<success::Success<ReviewEntity>, error::Error> {
    let claims = bearer_claims(&req)?;
    require_role(&claims, UserRole::Employer)?;
    let employer = employer_service
        .get_by_user_id(&claims.sub)
        .await?
        .ok_or_else(|| error::Error::not_found("Employer profile not found"))?;

    let review = review_service
        .create_review(employer.id, worker_id.into_inner(), review_data.0)
        .await?;
    Ok(success::Success::created(Some(review)).message("Review created successfully"))
}
