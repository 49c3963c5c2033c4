use actix_web::web::{resource, scope, ServiceConfig};
use actix_web::web;

use crate::modules::conversation::handle::*;
use crate::modules::message::handle::{get_messages, mark_read, send_message};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/conversations")
            .service(
                resource("")
                    .route(web::get().to(list_conversations))
                    .route(web::post().to(get_or_create_conversation)),
            )
            .service(
                resource("/{id:[0-9a-fA-F-]{36}}/messages")
                    .route(web::get().to(get_messages))
                    .route(web::post().to(send_message)),
            )
            .service(resource("/{id:[0-9a-fA-F-]{36}}/read").route(web::post().to(mark_read)))
            .service(resource("/{id:[0-9a-fA-F-]{36}}").route(web::get().to(get_conversation))),
    );
}
