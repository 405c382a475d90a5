use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};

use salary_checker_backend::config::{Config, StoreBackend};
use salary_checker_backend::db::postgres::create_pool;
use salary_checker_backend::db::{MemoryIdentity, MemoryStore, PgDocumentStore, PgIdentityProvider};
use salary_checker_backend::routes;
use salary_checker_backend::state::AppState;

async fn build_state(config: &Config) -> AppState {
    match (config.backend, config.database_url.as_deref()) {
        (StoreBackend::Postgres, Some(database_url)) => {
            let pool = create_pool(database_url)
                .await
                .expect("Failed to connect to the database");

            let store = PgDocumentStore::new(pool.clone());
            store.ensure_schema().await.expect("Failed to prepare documents table");
            let identity = PgIdentityProvider::new(pool);
            identity
                .ensure_schema()
                .await
                .expect("Failed to prepare identity_users table");

            info!("Using Postgres document store");
            AppState::new(Arc::new(store), Arc::new(identity), config.salary_zero)
        }
        _ => {
            warn!("Using in-memory store; data is lost on restart");
            AppState::new(
                Arc::new(MemoryStore::new()),
                Arc::new(MemoryIdentity::new()),
                config.salary_zero,
            )
        }
    }
}

fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().expect("Invalid configuration");
    let state = web::Data::new(build_state(&config).await);

    info!(
        "Starting server at {} (salary zero policy: {})",
        config.bind_addr, config.salary_zero
    );

    let allowed_origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
