//! # API Response Models
//!
//! Structures for outgoing API response bodies.
//!
//! ## Projections
//!
//! Each endpoint emits one of the fixed projections below, never a raw
//! database record. Nested relationships use the *summary* projection of
//! the related type, which has no relationship fields of its own, so a
//! camper's activities never re-embed campers and vice versa.
//!
//! | Projection | Fields |
//! |------------|--------|
//! | `ActivitySummary` | id, name, difficulty |
//! | `CamperSummary` | id, name, age |
//! | `CamperDetail` | id, name, age, activities |
//! | `ActivityDetail` | id, name, difficulty, campers |
//!
//! ## Error Response
//!
//! ```json
//! {
//!     "error": "404: Camper not found"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{ActivityRecord, CamperRecord};

/// Body of every 400 response.
pub const VALIDATION_ERROR_MESSAGE: &str = "400: Validation error";

/// Body of a 404 from the camper endpoints.
pub const CAMPER_NOT_FOUND_MESSAGE: &str = "404: Camper not found";

/// Body of a 404 from the activity endpoints.
pub const ACTIVITY_NOT_FOUND_MESSAGE: &str = "404: Activity not found";

/// Fixed-shape error payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// Default activity projection.
///
/// Returned by `GET /activities` and `POST /signups`, and nested inside
/// [`CamperDetail`].
///
/// ## Example Response
///
/// ```json
/// {
///     "id": 1,
///     "name": "Archery",
///     "difficulty": 2
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivitySummary {
    pub id: i32,
    pub name: Option<String>,
    pub difficulty: Option<i32>,
}

impl From<&ActivityRecord> for ActivitySummary {
    fn from(record: &ActivityRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            difficulty: record.difficulty,
        }
    }
}

/// Camper projection without relationships.
///
/// Returned by `GET /campers` and `POST /campers`, and nested inside
/// [`ActivityDetail`].
///
/// ## Example Response
///
/// ```json
/// {
///     "id": 1,
///     "name": "Alex",
///     "age": 12
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CamperSummary {
    pub id: i32,
    pub name: String,
    pub age: i32,
}

impl From<&CamperRecord> for CamperSummary {
    fn from(record: &CamperRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            age: record.age,
        }
    }
}

/// Camper with the activities they signed up for.
///
/// Returned by `GET /campers/{id}`.
///
/// ## Example Response
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
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CamperDetail {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub activities: Vec<ActivitySummary>,
}

impl CamperDetail {
    pub fn new(camper: &CamperRecord, activities: &[ActivityRecord]) -> Self {
        Self {
            id: camper.id,
            name: camper.name.clone(),
            age: camper.age,
            activities: activities.iter().map(ActivitySummary::from).collect(),
        }
    }
}

/// Activity with the campers signed up for it.
///
/// Returned by `GET /activities/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityDetail {
    pub id: i32,
    pub name: Option<String>,
    pub difficulty: Option<i32>,
    pub campers: Vec<CamperSummary>,
}

impl ActivityDetail {
    pub fn new(activity: &ActivityRecord, campers: &[CamperRecord]) -> Self {
        Self {
            id: activity.id,
            name: activity.name.clone(),
            difficulty: activity.difficulty,
            campers: campers.iter().map(CamperSummary::from).collect(),
        }
    }
}

/// Health check response.
///
/// Returned by `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,

    /// Whether the store answered a round trip.
    pub database: bool,

    /// "postgres" or "sqlite"
    pub backend: String,

    /// Crate version
    pub version: String,

    pub timestamp: DateTime<Utc>,
}
