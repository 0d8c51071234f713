//! # Camp Manager Service
//!
//! The CampManager is the one service behind every resource endpoint.
//! Each method is a single request→response step: validate, query,
//! project. There is no in-process state besides the store handle.
//!
//! ## Flow Example: Signup
//!
//! ```text
//! 1. POST /signups {time, camper_id, activity_id}
//!                ↓
//! 2. CampManager.create_signup() called
//!                ↓
//! 3. NewSignup::new() checks 0 <= time <= 23
//!                ↓
//! 4. queries::create_signup() inserts and reads the activity back
//!    in one transaction (foreign keys reject unknown ids)
//!                ↓
//! 5. Activity projected to {id, name, difficulty}
//! ```

use tracing::{debug, info};

use crate::db::queries;
use crate::db::validation::ValidationError;
use crate::db::{Database, DatabaseError, NewCamper, NewSignup};
use crate::models::{
    ActivityDetail, ActivitySummary, CamperDetail, CamperSummary, CreateCamperRequest,
    CreateSignupRequest,
};

/// Errors that can occur in camp operations.
///
/// Handlers map these to HTTP statuses; the detail is only logged.
#[derive(Debug, thiserror::Error)]
pub enum CampError {
    /// Input failed a field check.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No record with the requested id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// The store rejected or failed the operation.
    #[error("Database error: {0}")]
    Store(#[from] DatabaseError),
}

/// Service for camper, activity and signup operations.
///
/// ## Usage
///
/// ```rust,ignore
/// let manager = CampManager::new(db);
///
/// let camper = manager.create_camper(request).await?;
/// let detail = manager.get_camper(camper.id).await?;
/// ```
#[derive(Clone)]
pub struct CampManager {
    /// Database handle shared with the rest of the app.
    db: Database,
}

impl CampManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // ==========================================
    // CAMPERS
    // ==========================================

    /// All campers, without their activities.
    pub async fn list_campers(&self) -> Result<Vec<CamperSummary>, CampError> {
        let campers = queries::list_campers(&self.db).await?;
        debug!("Listing {} campers", campers.len());
        Ok(campers.iter().map(CamperSummary::from).collect())
    }

    /// Validate and persist a new camper.
    ///
    /// The row is committed before this returns.
    ///
    /// ## Returns
    ///
    /// * `Ok(CamperSummary)` - The stored camper
    /// * `Err(CampError::Validation)` - Empty name or age outside 8..=18
    /// * `Err(CampError::Store)` - Insert failed
    pub async fn create_camper(
        &self,
        request: CreateCamperRequest,
    ) -> Result<CamperSummary, CampError> {
        let camper = NewCamper::new(&request.name, request.age)?;
        let record = queries::insert_camper(&self.db, &camper).await?;
        Ok(CamperSummary::from(&record))
    }

    /// One camper with the activities they signed up for.
    pub async fn get_camper(&self, id: i32) -> Result<CamperDetail, CampError> {
        let camper = queries::get_camper(&self.db, id)
            .await?
            .ok_or(CampError::NotFound { entity: "Camper", id })?;
        let activities = queries::activities_for_camper(&self.db, id).await?;
        Ok(CamperDetail::new(&camper, &activities))
    }

    // ==========================================
    // ACTIVITIES
    // ==========================================

    /// All activities in their default projection.
    pub async fn list_activities(&self) -> Result<Vec<ActivitySummary>, CampError> {
        let activities = queries::list_activities(&self.db).await?;
        debug!("Listing {} activities", activities.len());
        Ok(activities.iter().map(ActivitySummary::from).collect())
    }

    /// One activity with the campers signed up for it.
    pub async fn get_activity(&self, id: i32) -> Result<ActivityDetail, CampError> {
        let activity = queries::get_activity(&self.db, id)
            .await?
            .ok_or(CampError::NotFound { entity: "Activity", id })?;
        let campers = queries::campers_for_activity(&self.db, id).await?;
        Ok(ActivityDetail::new(&activity, &campers))
    }

    /// Remove an activity and every signup for it.
    pub async fn delete_activity(&self, id: i32) -> Result<(), CampError> {
        if queries::delete_activity(&self.db, id).await? {
            Ok(())
        } else {
            Err(CampError::NotFound { entity: "Activity", id })
        }
    }

    // ==========================================
    // SIGNUPS
    // ==========================================

    /// Validate and persist a signup, returning the activity it joins.
    ///
    /// Unknown camper or activity ids surface as `CampError::Store`
    /// from the foreign key check.
    pub async fn create_signup(
        &self,
        request: CreateSignupRequest,
    ) -> Result<ActivitySummary, CampError> {
        let signup = NewSignup::new(request.time, request.camper_id, request.activity_id)?;
        let (record, activity) = queries::create_signup(&self.db, &signup).await?;
        info!(
            "Camper {} signed up for '{}' at {}:00",
            record.camper_id,
            activity.name.as_deref().unwrap_or("unnamed activity"),
            record.time
        );
        Ok(ActivitySummary::from(&activity))
    }
}
