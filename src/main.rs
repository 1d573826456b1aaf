mod assistant;
mod config;
mod database;
mod error;
mod web;

use actix_web::middleware::Logger;
use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::info;

use assistant::DemoAssistant;
use config::ServerConfig;
use database::{Database, EnvPresence};
use web::routes;

// App state structure
struct AppState {
    assistant: DemoAssistant,
    database: Database,
    // Read on every diagnostics request
    env: fn() -> EnvPresence,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env()?;
    info!("Starting demo chat backend on {}:{}", config.host, config.port);

    let database = Database::from_config(&config);
    info!("Database collaborator: {}", database.describe());

    let app_state = Data::new(AppState {
        assistant: DemoAssistant::new(),
        database,
        env: EnvPresence::from_env,
    });

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .app_data(error::json_config())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
