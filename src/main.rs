// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, storage backends, and start HTTP server

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    http::header,
    middleware::{from_fn, Compress, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use event_gallery::{
    config::Config,
    handlers,
    middleware::{require_password, AccessGate},
    storage::local::UPLOADS_ROUTE,
};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting event-gallery...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Open record and blob stores
    let state = match event_gallery::build_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to initialize storage: {:#}", e);
            std::process::exit(1);
        }
    };

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let gate = AccessGate::new(config.site_password.clone());
    let uploads_dir = config.uploads_dir.clone();
    let public_dir = config.public_dir.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin_fn(|_, _| true)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials();

        App::new()
            // Application state (stores, password, JSON limits)
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(gate.clone()))
            .app_data(handlers::json_config())
            // Middleware: last wrap runs first, so CORS answers preflights before the gate
            .wrap(Compress::default())
            .wrap(from_fn(require_password))
            .wrap(cors)
            .wrap(Logger::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::comments_config)
            .configure(handlers::photos_config)
            .configure(handlers::updates_config)
            .service(Files::new(UPLOADS_ROUTE, &uploads_dir))
            .service(Files::new("/", &public_dir).index_file("index.html"))
    })
    .bind(&server_addr)?
    .run()
    .await
}
