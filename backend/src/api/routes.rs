//! # API Route Configuration
//!
//! This module sets up all the HTTP routes for the API, plus the
//! extractor settings that keep malformed requests on the fixed error
//! payloads.

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

use super::handlers;
use crate::models::{
    ErrorResponse, ACTIVITY_NOT_FOUND_MESSAGE, CAMPER_NOT_FOUND_MESSAGE, VALIDATION_ERROR_MESSAGE,
};

/// Configure all API routes.
///
/// This function is called from main.rs to set up
/// all the endpoint routes.
///
/// ## Route Structure
///
/// ```text
/// /
/// ├── /health              GET - Health check
/// ├── /campers             GET - List, POST - Create
/// │   └── /{id}            GET - Camper with activities
/// ├── /activities          GET - List
/// │   └── /{id}            GET - Activity with campers, DELETE - Remove
/// └── /signups             POST - Create
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Bad JSON bodies only ever reach create endpoints
        .app_data(json_config())

        // Root endpoint - greeting
        .route("/", web::get().to(handlers::home))

        // Health check endpoint
        .route("/health", web::get().to(handlers::health_check))

        .service(
            web::scope("/campers")
                .app_data(path_config(CAMPER_NOT_FOUND_MESSAGE))
                .route("", web::get().to(handlers::list_campers))
                .route("", web::post().to(handlers::create_camper))
                .route("/{id}", web::get().to(handlers::get_camper))
        )

        .service(
            web::scope("/activities")
                .app_data(path_config(ACTIVITY_NOT_FOUND_MESSAGE))
                .route("", web::get().to(handlers::list_activities))
                .route("/{id}", web::get().to(handlers::get_activity))
                .route("/{id}", web::delete().to(handlers::delete_activity))
        )

        .service(
            web::scope("/signups")
                .route("", web::post().to(handlers::create_signup))
        );
}

/// Turn any JSON body error into the generic 400 payload.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::warn!("Rejected request body: {}", err);
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(VALIDATION_ERROR_MESSAGE));
        InternalError::from_response(err, response).into()
    })
}

/// Turn a non-numeric `{id}` into the resource's 404 payload.
fn path_config(message: &'static str) -> web::PathConfig {
    web::PathConfig::default().error_handler(move |err, _req| {
        tracing::debug!("Rejected path parameter: {}", err);
        let response = HttpResponse::NotFound().json(ErrorResponse::new(message));
        InternalError::from_response(err, response).into()
    })
}
