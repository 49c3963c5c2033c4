use crate::modules::review::handle::*;
use actix_web::web;
use actix_web::web::{resource, ServiceConfig};

/// Registered before the worker scope so the longer path wins.
pub fn public_api_configure(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/workers/{worker_id:[0-9a-fA-F-]{36}}/reviews")
            .route(web::get().to(list_worker_reviews))
            .route(web::post().to(create_worker_review)),
    );
}
