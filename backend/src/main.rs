//! # Camp Activities Backend Service
//!
//! This is the main entry point for the backend that manages summer-camp
//! activities, campers and their signups. It provides:
//!
//! - REST API for listing and registering campers
//! - Activity listing and deletion (signups cascade)
//! - Signups linking a camper to an activity at a given hour
//! - PostgreSQL or SQLite storage, picked by `DATABASE_URL`
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        BACKEND SERVICE                           │
//! │                                                                  │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                   REST API (Actix)                         │  │
//! │  │   /campers   /campers/{id}   /activities   /signups        │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                          │                                       │
//! │  ┌───────────────────────┴───────────────────────────────────┐  │
//! │  │                    SERVICE LAYER                           │  │
//! │  │   CampManager: validation → queries → projections          │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                          │                                       │
//! │         ┌────────────────┴────────────────┐                     │
//! │  ┌──────┴──────┐                   ┌──────┴──────┐              │
//! │  │  PostgreSQL │                   │   SQLite    │              │
//! │  │  (pooled)   │                   │   (file)    │              │
//! │  └─────────────┘                   └─────────────┘              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! 1. Optionally copy `.env.example` to `.env` and configure
//! 2. Start the server: `SEED_DATABASE=true cargo run`
//! 3. `curl http://127.0.0.1:5555/activities`
//!
//! ## Environment Variables
//!
//! See `config` module docs for all settings.

use std::sync::Arc;
use actix_web::{web, App, HttpServer, middleware};
use tracing::{info, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod api;
mod config;
mod db;
mod models;
mod services;

use config::AppConfig;
use db::Database;
use services::CampManager;

/// Application state shared across all handlers.
pub struct AppState {
    /// Store handle (pool or single connection)
    pub db: Database,

    /// Camper, activity and signup operations
    pub camp_manager: CampManager,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            camp_manager: CampManager::new(db.clone()),
            db,
        }
    }
}

/// Main entry point for the backend service.
///
/// This function:
/// 1. Loads configuration from environment
/// 2. Connects to the store and applies the schema
/// 3. Seeds sample data when asked
/// 4. Launches the HTTP server
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // =========================================
    // STEP 1: Load .env and Initialize Logging
    // =========================================
    dotenvy::dotenv().ok(); // It's okay if .env doesn't exist

    // try_init also forwards `log` records, so actix's Logger shows up
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    info!("🚀 Starting Camp Activities Backend");

    // =========================================
    // STEP 2: Load Configuration
    // =========================================
    let config = AppConfig::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("📋 Configuration loaded");
    info!("   Listen: {}:{}", config.server_host, config.server_port);

    // =========================================
    // STEP 3: Initialize Database
    // =========================================
    let db = Database::connect(&config.database_url, config.db_pool_size)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;

    info!("🗄️  Database connected ({})", db.backend_name());

    db.run_migrations().await.map_err(|e| {
        error!("Failed to run migrations: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    info!("📦 Database migrations complete");

    if config.seed_database {
        db::seed::seed_if_empty(&db).await.map_err(|e| {
            error!("Failed to seed database: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;
    }

    // =========================================
    // STEP 4: Create Application State
    // =========================================
    let app_state = Arc::new(AppState::new(db));

    // =========================================
    // STEP 5: Start HTTP Server
    // =========================================
    let server_host = config.server_host.clone();
    let server_port = config.server_port;

    info!("🌐 Starting HTTP server on {}:{}", server_host, server_port);

    HttpServer::new(move || {
        App::new()
            // Attach shared application state
            .app_data(web::Data::new(app_state.clone()))

            // Add logging middleware
            .wrap(middleware::Logger::default())

            // Configure API routes
            .configure(api::configure_routes)
    })
    .bind((server_host.as_str(), server_port))?
    .run()
    .await
}
