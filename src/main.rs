use actix_cors::Cors;
use actix_web::{
    self, App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{RedisCache, connect_database},
    middlewares::authentication,
    modules::{
        conversation::{
            repository::ConversationRepository, repository_pg::ConversationRepositoryPg,
            service::ConversationService,
        },
        employer::{
            repository::EmployerRepository, repository_pg::EmployerRepositoryPg,
            service::EmployerService,
        },
        job::{repository::JobRepository, repository_pg::JobRepositoryPg, service::JobService},
        memory::MemStore,
        message::{
            repository::MessageRepository, repository_pg::MessageRepositoryPg,
            service::MessageService,
        },
        realtime::{hub::MessageHub, ws::websocket_handler},
        review::{
            repository::ReviewRepository, repository_pg::ReviewRepositoryPg,
            service::ReviewService,
        },
        saved_worker::{
            repository::SavedWorkerRepository, repository_pg::SavedWorkerRepositoryPg,
            service::SavedWorkerService,
        },
        upload::{model::AvatarConfig, service::AvatarStorage},
        worker::{
            repository::WorkerRepository, repository_pg::WorkerRepositoryPg,
            service::WorkerService,
        },
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    constants::Env::default()
});

struct Repos {
    worker: Arc<dyn WorkerRepository + Send + Sync>,
    employer: Arc<dyn EmployerRepository + Send + Sync>,
    job: Arc<dyn JobRepository + Send + Sync>,
    review: Arc<dyn ReviewRepository + Send + Sync>,
    saved: Arc<dyn SavedWorkerRepository + Send + Sync>,
    conversation: Arc<dyn ConversationRepository + Send + Sync>,
    message: Arc<dyn MessageRepository + Send + Sync>,
}

/// Postgres when DATABASE_URL is set, the seeded in-memory store
/// otherwise. Every repository comes from the same store so the two
/// modes never mix.
async fn build_repos() -> Result<Repos, api::error::SystemError> {
    match ENV.database_url.as_deref() {
        Some(url) => {
            let pool = connect_database(url).await?;
            log::info!("Connected to Postgres");
            Ok(Repos {
                worker: Arc::new(WorkerRepositoryPg::new(pool.clone())),
                employer: Arc::new(EmployerRepositoryPg::new(pool.clone())),
                job: Arc::new(JobRepositoryPg::new(pool.clone())),
                review: Arc::new(ReviewRepositoryPg::new(pool.clone())),
                saved: Arc::new(SavedWorkerRepositoryPg::new(pool.clone())),
                conversation: Arc::new(ConversationRepositoryPg::new(pool.clone())),
                message: Arc::new(MessageRepositoryPg::new(pool)),
            })
        }
        None => {
            log::warn!("DATABASE_URL not set, serving the in-memory demo store");
            let store = Arc::new(MemStore::with_demo_data());
            Ok(Repos {
                worker: store.clone(),
                employer: store.clone(),
                job: store.clone(),
                review: store.clone(),
                saved: store.clone(),
                conversation: store.clone(),
                message: store,
            })
        }
    }
}

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let repos = build_repos().await.map_err(|e| std::io::Error::other(e.to_string()))?;

    let cache = match ENV.redis_url.as_deref() {
        Some(url) => {
            let cache =
                RedisCache::new(url).map_err(|e| std::io::Error::other(e.to_string()))?;
            Some(Arc::new(cache))
        }
        None => None,
    };

    let hub = Arc::new(MessageHub::new());

    let worker_service = WorkerService::with_dependencies(repos.worker.clone(), cache);
    let employer_service = EmployerService::with_dependencies(repos.employer.clone());
    let job_service = JobService::with_dependencies(repos.job);
    let review_service = ReviewService::with_dependencies(repos.review, repos.worker.clone());
    let saved_worker_service =
        SavedWorkerService::with_dependencies(repos.saved, repos.worker.clone());
    let conversation_service = ConversationService::with_dependencies(
        repos.conversation.clone(),
        repos.worker,
        repos.employer,
    );
    let message_service =
        MessageService::with_dependencies(repos.message, repos.conversation, hub);
    let avatar_storage =
        AvatarStorage::new(AvatarConfig::new(ENV.upload_dir.clone(), ENV.upload_base_url.clone()));

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(worker_service.clone()))
            .app_data(web::Data::new(employer_service.clone()))
            .app_data(web::Data::new(job_service.clone()))
            .app_data(web::Data::new(review_service.clone()))
            .app_data(web::Data::new(saved_worker_service.clone()))
            .app_data(web::Data::new(conversation_service.clone()))
            .app_data(web::Data::new(message_service.clone()))
            .app_data(web::Data::new(avatar_storage.clone()))
            .service(health_check)
            .route("/ws", web::get().to(websocket_handler))
            .service(
                web::scope("/api")
                    .configure(modules::review::route::public_api_configure)
                    .configure(modules::worker::route::public_api_configure)
                    .configure(modules::employer::route::public_api_configure)
                    .configure(modules::job::route::public_api_configure)
                    .service(
                        web::scope("")
                            .wrap(from_fn(authentication))
                            .configure(modules::session::route::configure)
                            .configure(modules::conversation::route::configure)
                            .configure(modules::saved_worker::route::configure)
                            .configure(modules::upload::route::configure),
                    ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
