use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::review::model::{CreateReviewModel, InsertReview, ReviewResponse};
use crate::modules::review::repository::ReviewRepository;
use crate::modules::review::schema::ReviewEntity;
use crate::modules::worker::repository::WorkerRepository;

#[derive(Clone)]
pub struct ReviewService {
    repo: Arc<dyn ReviewRepository + Send + Sync>,
    worker_repo: Arc<dyn WorkerRepository + Send + Sync>,
}

impl ReviewService {
    pub fn with_dependencies(
        repo: Arc<dyn ReviewRepository + Send + Sync>,
        worker_repo: Arc<dyn WorkerRepository + Send + Sync>,
    ) -> Self {
        info!("ReviewService initialized with dependencies");
        ReviewService { repo, worker_repo }
    }

    pub async fn list_for_worker(
        &self,
        worker_id: Uuid,
    ) -> Result<Vec<ReviewResponse>, error::SystemError> {
        if self.worker_repo.find_by_id(&worker_id).await?.is_none() {
            return Err(error::SystemError::not_found("Worker profile not found"));
        }
        self.repo.find_by_worker(&worker_id).await
    }

    pub async fn create_review(
        &self,
        employer_id: Uuid,
        worker_id: Uuid,
        model: CreateReviewModel,
    ) -> Result<ReviewEntity, error::SystemError> {
        if self.worker_repo.find_by_id(&worker_id).await?.is_none() {
            return Err(error::SystemError::not_found("Worker profile not found"));
        }
        let insert = InsertReview {
            worker_id,
            employer_id,
            rating: model.rating,
            comment: model.comment,
        };
        self.repo.create(&insert).await
    }
}
