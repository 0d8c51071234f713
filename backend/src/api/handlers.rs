//! # API Request Handlers
//!
//! This module contains the handler functions for each API endpoint.
//! Each handler:
//! 1. Extracts request data
//! 2. Calls the CampManager
//! 3. Maps the outcome to a status code and JSON body
//!
//! ## Error Handling
//!
//! Every error is caught here. The cause is logged, then collapsed into
//! one fixed payload per endpoint kind:
//!
//! | Endpoint kind | Status | Body |
//! |---------------|--------|------|
//! | create | 400 | `{"error": "400: Validation error"}` |
//! | camper lookup | 404 | `{"error": "404: Camper not found"}` |
//! | activity lookup/delete | 404 | `{"error": "404: Activity not found"}` |

use std::sync::Arc;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use tracing::{info, warn, error};

use crate::AppState;
use crate::models::{
    CreateCamperRequest,
    CreateSignupRequest,
    ErrorResponse,
    HealthResponse,
    ACTIVITY_NOT_FOUND_MESSAGE,
    CAMPER_NOT_FOUND_MESSAGE,
    VALIDATION_ERROR_MESSAGE,
};
use crate::services::CampError;

/// Body of a 500 from the list endpoints.
const INTERNAL_ERROR_MESSAGE: &str = "500: Internal server error";

/// Root greeting.
///
/// ## Endpoint
///
/// `GET /`
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello!")
}

/// Health check endpoint.
///
/// ## Endpoint
///
/// `GET /health`
///
/// ## Response
///
/// ```json
/// {
///     "status": "healthy",
///     "database": true,
///     "backend": "sqlite",
///     "version": "0.1.0",
///     "timestamp": "2026-07-01T12:00:00Z"
/// }
/// ```
pub async fn health_check(
    state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    let db_healthy = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check: database unreachable: {}", e);
            false
        }
    };

    let response = HealthResponse {
        status: if db_healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: db_healthy,
        backend: state.db.backend_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    };

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status_code).json(response)
}

// ==========================================
// CAMPERS
// ==========================================

/// List all campers.
///
/// ## Endpoint
///
/// `GET /campers`
///
/// ## Response
///
/// ```json
/// [
///     { "id": 1, "name": "Alex", "age": 12 }
/// ]
/// ```
pub async fn list_campers(
    state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    match state.camp_manager.list_campers().await {
        Ok(campers) => HttpResponse::Ok().json(campers),
        Err(e) => {
            error!("List campers failed: {}", e);
            internal_error()
        }
    }
}

/// Register a camper.
///
/// ## Endpoint
///
/// `POST /campers`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:5555/campers \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Alex", "age": 12}'
/// ```
///
/// **Response (201):**
/// ```json
/// { "id": 1, "name": "Alex", "age": 12 }
/// ```
///
/// **Response (400):** empty name, age outside 8-18, or a missing field.
/// ```json
/// { "error": "400: Validation error" }
/// ```
pub async fn create_camper(
    state: web::Data<Arc<AppState>>,
    body: web::Json<CreateCamperRequest>,
) -> HttpResponse {
    info!("Create camper request: {:?}", body.name);

    match state.camp_manager.create_camper(body.into_inner()).await {
        Ok(camper) => HttpResponse::Created().json(camper),
        Err(e) => {
            log_failure("Create camper", &e);
            validation_error()
        }
    }
}

/// Get one camper with the activities they signed up for.
///
/// ## Endpoint
///
/// `GET /campers/{id}`
///
/// ## Response
///
/// ```json
/// {
///     "id": 1,
///     "name": "Alex",
///     "age": 12,
///     "activities": [
///         { "id": 3, "name": "Canoeing", "difficulty": 4 }
///     ]
/// }
/// ```
pub async fn get_camper(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    match state.camp_manager.get_camper(id).await {
        Ok(camper) => HttpResponse::Ok().json(camper),
        Err(e) => {
            log_failure("Get camper", &e);
            not_found(CAMPER_NOT_FOUND_MESSAGE)
        }
    }
}

// ==========================================
// ACTIVITIES
// ==========================================

/// List all activities.
///
/// ## Endpoint
///
/// `GET /activities`
pub async fn list_activities(
    state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    match state.camp_manager.list_activities().await {
        Ok(activities) => HttpResponse::Ok().json(activities),
        Err(e) => {
            error!("List activities failed: {}", e);
            internal_error()
        }
    }
}

/// Get one activity with the campers signed up for it.
///
/// ## Endpoint
///
/// `GET /activities/{id}`
pub async fn get_activity(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    match state.camp_manager.get_activity(id).await {
        Ok(activity) => HttpResponse::Ok().json(activity),
        Err(e) => {
            log_failure("Get activity", &e);
            not_found(ACTIVITY_NOT_FOUND_MESSAGE)
        }
    }
}

/// Delete an activity and all of its signups.
///
/// ## Endpoint
///
/// `DELETE /activities/{id}`
///
/// Responds `204 No Content` with an empty body, or 404 when the id is
/// unknown (including a repeated delete).
pub async fn delete_activity(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();
    info!("Delete activity request: {}", id);

    match state.camp_manager.delete_activity(id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => {
            log_failure("Delete activity", &e);
            not_found(ACTIVITY_NOT_FOUND_MESSAGE)
        }
    }
}

// ==========================================
// SIGNUPS
// ==========================================

/// Sign a camper up for an activity.
///
/// ## Endpoint
///
/// `POST /signups`
///
/// ## Example
///
/// ```bash
/// curl -X POST http://127.0.0.1:5555/signups \
///   -H "Content-Type: application/json" \
///   -d '{"time": 9, "camper_id": 1, "activity_id": 3}'
/// ```
///
/// **Response (201):** the activity signed up for.
/// ```json
/// { "id": 3, "name": "Canoeing", "difficulty": 4 }
/// ```
pub async fn create_signup(
    state: web::Data<Arc<AppState>>,
    body: web::Json<CreateSignupRequest>,
) -> HttpResponse {
    info!(
        "Signup request: camper {} -> activity {} at {}",
        body.camper_id, body.activity_id, body.time
    );

    match state.camp_manager.create_signup(body.into_inner()).await {
        Ok(activity) => HttpResponse::Created().json(activity),
        Err(e) => {
            log_failure("Create signup", &e);
            validation_error()
        }
    }
}

// ==========================================
// HELPERS
// ==========================================

fn validation_error() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(VALIDATION_ERROR_MESSAGE))
}

fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(message))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE))
}

/// Client mistakes are warnings; store failures are errors.
fn log_failure(operation: &str, e: &CampError) {
    match e {
        CampError::Validation(_) | CampError::NotFound { .. } => {
            warn!("{} rejected: {}", operation, e)
        }
        CampError::Store(_) => error!("{} failed: {}", operation, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::api::configure_routes;
    use crate::db::{queries, Database, NewActivity};

    async fn test_state() -> web::Data<Arc<AppState>> {
        let db = Database::connect("sqlite::memory:", 1).await.unwrap();
        db.run_migrations().await.unwrap();
        web::Data::new(Arc::new(AppState::new(db)))
    }

    async fn add_activity(state: &web::Data<Arc<AppState>>, name: &str, difficulty: i32) -> i32 {
        let activity = NewActivity {
            name: name.to_string(),
            difficulty,
        };
        queries::insert_activity(&state.db, &activity).await.unwrap().id
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(configure_routes)).await
        };
    }

    #[actix_rt::test]
    async fn test_home_greets() {
        let state = test_state().await;
        let app = app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "Hello!");
    }

    #[actix_rt::test]
    async fn test_health_reports_database() {
        let state = test_state().await;
        let app = app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], true);
        assert_eq!(body["backend"], "sqlite");
    }

    #[actix_rt::test]
    async fn test_create_camper_then_get_it_back() {
        let state = test_state().await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/campers")
            .set_json(json!({"name": "Alex", "age": 12}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"id": 1, "name": "Alex", "age": 12}));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/campers/1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"id": 1, "name": "Alex", "age": 12, "activities": []}));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/campers").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([{"id": 1, "name": "Alex", "age": 12}]));
    }

    #[actix_rt::test]
    async fn test_invalid_campers_are_rejected_and_not_stored() {
        let state = test_state().await;
        let app = app!(state);

        let bodies = [
            json!({"name": "Bad", "age": 99}),
            json!({"name": "Young", "age": 7}),
            json!({"name": "", "age": 12}),
            json!({"age": 12}),
            json!({"name": "NoAge"}),
            json!({"name": "Text", "age": "twelve"}),
        ];

        for body in bodies {
            let req = test::TestRequest::post().uri("/campers").set_json(&body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {}", body);
            let payload: Value = test::read_body_json(resp).await;
            assert_eq!(payload, json!({"error": "400: Validation error"}));
        }

        let resp = test::call_service(&app, test::TestRequest::get().uri("/campers").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));
    }

    #[actix_rt::test]
    async fn test_unknown_camper_is_not_found() {
        let state = test_state().await;
        let app = app!(state);

        for uri in ["/campers/42", "/campers/not-a-number"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri: {}", uri);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({"error": "404: Camper not found"}));
        }
    }

    #[actix_rt::test]
    async fn test_list_activities_uses_default_projection() {
        let state = test_state().await;
        add_activity(&state, "Archery", 2).await;
        add_activity(&state, "Swimming", 3).await;
        let app = app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/activities").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!([
                {"id": 1, "name": "Archery", "difficulty": 2},
                {"id": 2, "name": "Swimming", "difficulty": 3}
            ])
        );
    }

    #[actix_rt::test]
    async fn test_signup_returns_activity_and_links_camper() {
        let state = test_state().await;
        let canoe = add_activity(&state, "Canoeing", 4).await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/campers")
            .set_json(json!({"name": "Sam", "age": 10}))
            .to_request();
        let camper: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let camper_id = camper["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/signups")
            .set_json(json!({"time": 9, "camper_id": camper_id, "activity_id": canoe}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"id": canoe, "name": "Canoeing", "difficulty": 4}));

        let uri = format!("/campers/{}", camper_id);
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["activities"], json!([{"id": canoe, "name": "Canoeing", "difficulty": 4}]));

        let uri = format!("/activities/{}", canoe);
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["campers"], json!([{"id": camper_id, "name": "Sam", "age": 10}]));
    }

    #[actix_rt::test]
    async fn test_invalid_signups_are_rejected_and_not_stored() {
        let state = test_state().await;
        let archery = add_activity(&state, "Archery", 2).await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/campers")
            .set_json(json!({"name": "Sam", "age": 10}))
            .to_request();
        let camper: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let camper_id = camper["id"].as_i64().unwrap();

        let bodies = [
            json!({"time": 25, "camper_id": camper_id, "activity_id": archery}),
            json!({"time": -1, "camper_id": camper_id, "activity_id": archery}),
            json!({"time": 9, "camper_id": camper_id, "activity_id": 999}),
            json!({"time": 9, "camper_id": 999, "activity_id": archery}),
            json!({"time": 9, "camper_id": camper_id}),
        ];

        for body in bodies {
            let req = test::TestRequest::post().uri("/signups").set_json(&body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {}", body);
            let payload: Value = test::read_body_json(resp).await;
            assert_eq!(payload, json!({"error": "400: Validation error"}));
        }

        let uri = format!("/activities/{}", archery);
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["campers"], json!([]));
    }

    #[actix_rt::test]
    async fn test_delete_activity_cascades_and_is_not_repeatable() {
        let state = test_state().await;
        let archery = add_activity(&state, "Archery", 2).await;
        let swimming = add_activity(&state, "Swimming", 3).await;
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/campers")
            .set_json(json!({"name": "Sam", "age": 10}))
            .to_request();
        let camper: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let camper_id = camper["id"].as_i64().unwrap();

        for activity_id in [archery, swimming] {
            let req = test::TestRequest::post()
                .uri("/signups")
                .set_json(json!({"time": 10, "camper_id": camper_id, "activity_id": activity_id}))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let uri = format!("/activities/{}", archery);
        let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());

        let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "404: Activity not found"}));

        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // Only the signup for the surviving activity is left
        let uri = format!("/campers/{}", camper_id);
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["activities"], json!([{"id": swimming, "name": "Swimming", "difficulty": 3}]));
    }
}
