//! # REST API Module
//!
//! This module defines all HTTP endpoints for the camp backend.
//!
//! ## Endpoint Overview
//!
//! | Method | Path | Success | Failure |
//! |--------|------|---------|---------|
//! | GET | `/` | 200 plain-text greeting | - |
//! | GET | `/health` | 200 health report | 503 |
//! | GET | `/campers` | 200 `[{id, name, age}]` | - |
//! | POST | `/campers` | 201 `{id, name, age}` | 400 |
//! | GET | `/campers/{id}` | 200 `{id, name, age, activities}` | 404 |
//! | GET | `/activities` | 200 `[{id, name, difficulty}]` | - |
//! | GET | `/activities/{id}` | 200 `{id, name, difficulty, campers}` | 404 |
//! | DELETE | `/activities/{id}` | 204 empty | 404 |
//! | POST | `/signups` | 201 `{id, name, difficulty}` | 400 |
//!
//! ## Error Format
//!
//! Failures carry a fixed message and no detail about the cause:
//!
//! ```json
//! { "error": "400: Validation error" }
//! ```

pub mod routes;
pub mod handlers;

pub use routes::configure_routes;
