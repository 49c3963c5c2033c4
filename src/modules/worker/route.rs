use crate::modules::worker::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn public_api_configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/workers").service(search_workers).service(get_worker));
}
