//! # Database Models
//!
//! This module defines the data structures that map to database tables.
//! `*Record` structs are full rows as read back from the store; `New*`
//! structs are validated insert payloads.
//!
//! ## Table Overview
//!
//! | Table | Description |
//! |-------|-------------|
//! | `activities` | Camp activities with a difficulty rating |
//! | `campers` | Participants |
//! | `signups` | Camper ↔ activity at a given hour |
//!
//! ## Relationship Diagram
//!
//! ```text
//! ┌──────────────┐       ┌──────────────────┐       ┌─────────────┐
//! │  activities  │──────<│     signups      │>──────│   campers   │
//! │              │       │                  │       │             │
//! │ id (PK)      │       │ activity_id (FK) │       │ id (PK)     │
//! │ name         │       │ camper_id (FK)   │       │ name        │
//! │ difficulty   │       │ time             │       │ age         │
//! └──────────────┘       └──────────────────┘       └─────────────┘
//! ```
//!
//! Both foreign keys cascade on delete. `Camper.activities` and
//! `Activity.campers` are not stored; see `queries::activities_for_camper`
//! and `queries::campers_for_activity`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_camper_age, validate_camper_name, validate_signup_time, ValidationError,
};

/// A row of the `activities` table.
///
/// `name` and `difficulty` are nullable columns; difficulty has no
/// declared range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRecord {
    pub id: i32,
    pub name: Option<String>,
    pub difficulty: Option<i32>,

    /// Set by the store on insert.
    pub created_at: DateTime<Utc>,

    /// Set by the store on insert and by trigger on update.
    pub updated_at: DateTime<Utc>,
}

/// A row of the `campers` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CamperRecord {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `signups` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignupRecord {
    pub id: i32,

    /// Hour of day, 0-23.
    pub time: i32,
    pub activity_id: i32,
    pub camper_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for an activity. Only used for seeding.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub name: String,
    pub difficulty: i32,
}

/// Validated insert payload for a camper.
///
/// ## Example
///
/// ```rust,ignore
/// let camper = NewCamper::new("Alex", 12)?;
/// let record = queries::insert_camper(&db, &camper).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCamper {
    name: String,
    age: i32,
}

impl NewCamper {
    /// Check `name` and `age`, then build the payload.
    pub fn new(name: &str, age: i32) -> Result<Self, ValidationError> {
        let name = validate_camper_name(name)?.to_string();
        let age = validate_camper_age(age)?;
        Ok(Self { name, age })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }
}

/// Validated insert payload for a signup.
///
/// The two references are not checked here; the store's foreign keys
/// reject ids that do not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSignup {
    time: i32,
    camper_id: i32,
    activity_id: i32,
}

impl NewSignup {
    pub fn new(time: i32, camper_id: i32, activity_id: i32) -> Result<Self, ValidationError> {
        let time = validate_signup_time(time)?;
        Ok(Self {
            time,
            camper_id,
            activity_id,
        })
    }

    pub fn time(&self) -> i32 {
        self.time
    }

    pub fn camper_id(&self) -> i32 {
        self.camper_id
    }

    pub fn activity_id(&self) -> i32 {
        self.activity_id
    }
}
