//! # Sample Data
//!
//! Activities cannot be created over HTTP, so a fresh store would have
//! nothing to sign up for. When `SEED_DATABASE=true` the service inserts
//! this fixed set of activities, campers and signups on startup, but only
//! if the `activities` table is empty.

use tracing::info;

use super::models::{NewActivity, NewCamper, NewSignup};
use super::{queries, Database, DatabaseError};

const ACTIVITIES: &[(&str, i32)] = &[
    ("Archery", 2),
    ("Swimming", 3),
    ("Canoeing", 4),
    ("Rock Climbing", 5),
    ("Arts and Crafts", 1),
];

const CAMPERS: &[(&str, i32)] = &[
    ("Caitlin", 8),
    ("Lizzie", 9),
    ("Nicholas", 13),
    ("Amelia", 16),
];

/// `(time, camper index, activity index)` into the tables above.
const SIGNUPS: &[(i32, usize, usize)] = &[
    (9, 0, 0),
    (11, 0, 1),
    (10, 1, 4),
    (14, 2, 2),
    (15, 3, 3),
    (16, 3, 0),
];

/// Insert the sample data unless activities already exist.
///
/// Returns `true` when rows were inserted.
pub async fn seed_if_empty(db: &Database) -> Result<bool, DatabaseError> {
    let existing = queries::count_activities(db).await?;
    if existing > 0 {
        info!("Store already holds {} activities, skipping seed", existing);
        return Ok(false);
    }

    let mut activity_ids = Vec::with_capacity(ACTIVITIES.len());
    for (name, difficulty) in ACTIVITIES {
        let activity = NewActivity {
            name: name.to_string(),
            difficulty: *difficulty,
        };
        activity_ids.push(queries::insert_activity(db, &activity).await?.id);
    }

    let mut camper_ids = Vec::with_capacity(CAMPERS.len());
    for (name, age) in CAMPERS {
        let camper = NewCamper::new(name, *age)
            .map_err(|e| DatabaseError::ConfigError(format!("bad seed camper {}: {}", name, e)))?;
        camper_ids.push(queries::insert_camper(db, &camper).await?.id);
    }

    for (time, camper, activity) in SIGNUPS {
        let signup = NewSignup::new(*time, camper_ids[*camper], activity_ids[*activity])
            .map_err(|e| DatabaseError::ConfigError(format!("bad seed signup: {}", e)))?;
        queries::create_signup(db, &signup).await?;
    }

    info!(
        "🌱 Seeded {} activities, {} campers, {} signups",
        ACTIVITIES.len(),
        CAMPERS.len(),
        SIGNUPS.len()
    );
    Ok(true)
}
