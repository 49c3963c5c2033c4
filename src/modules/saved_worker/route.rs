use crate::modules::saved_worker::handle::*;
use actix_web::web;
use actix_web::web::{resource, scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/saved-workers")
            .service(resource("").route(web::get().to(list_saved_workers)))
            .service(
                resource("/{worker_id:[0-9a-fA-F-]{36}}")
                    .route(web::put().to(save_worker))
                    .route(web::delete().to(unsave_worker)),
            ),
    );
}
