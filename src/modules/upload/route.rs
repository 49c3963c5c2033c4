use actix_web::web::{resource, scope, ServiceConfig};
use actix_web::web;

use crate::modules::upload::handle::upload_avatar;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/uploads").service(resource("/avatar").route(web::post().to(upload_avatar))));
}
