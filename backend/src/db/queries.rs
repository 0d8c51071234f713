//! # Database Queries
//!
//! This module contains all the SQL queries for interacting with the database.
//! Each function performs one operation against either backend; the SQL is
//! kept side by side because the dialects differ only in placeholders
//! (`$1` for PostgreSQL, `?1` for SQLite).
//!
//! ## Query Organization
//!
//! - `*_camper*` - Camper table operations
//! - `*_activit*` - Activity table operations
//! - `create_signup` - Signup insert
//! - `activities_for_camper` / `campers_for_activity` - derived views over signups
//!
//! ## Error Handling
//!
//! All queries return `Result<T, DatabaseError>`. Lookups return
//! `Ok(None)` for a missing row rather than an error.

use deadpool_postgres::Pool;
use rusqlite::{params, OptionalExtension};
use tokio_postgres::Row;
use tracing::{debug, info};

use super::models::*;
use super::{Database, DatabaseError};

// ============================================
// HELPER FUNCTIONS
// ============================================

async fn pg_client(pool: &Pool) -> Result<deadpool_postgres::Object, DatabaseError> {
    pool.get().await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))
}

/// Helper to convert a PostgreSQL row to ActivityRecord
fn pg_row_to_activity(row: &Row) -> Result<ActivityRecord, DatabaseError> {
    Ok(ActivityRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        difficulty: row.try_get("difficulty")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Helper to convert a PostgreSQL row to CamperRecord
fn pg_row_to_camper(row: &Row) -> Result<CamperRecord, DatabaseError> {
    Ok(CamperRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Helper to convert a PostgreSQL row to SignupRecord
fn pg_row_to_signup(row: &Row) -> Result<SignupRecord, DatabaseError> {
    Ok(SignupRecord {
        id: row.try_get("id")?,
        time: row.try_get("time")?,
        activity_id: row.try_get("activity_id")?,
        camper_id: row.try_get("camper_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn sqlite_row_to_activity(row: &rusqlite::Row<'_>) -> rusqlite::Result<ActivityRecord> {
    Ok(ActivityRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        difficulty: row.get("difficulty")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn sqlite_row_to_camper(row: &rusqlite::Row<'_>) -> rusqlite::Result<CamperRecord> {
    Ok(CamperRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        age: row.get("age")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn sqlite_row_to_signup(row: &rusqlite::Row<'_>) -> rusqlite::Result<SignupRecord> {
    Ok(SignupRecord {
        id: row.get("id")?,
        time: row.get("time")?,
        activity_id: row.get("activity_id")?,
        camper_id: row.get("camper_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

// ============================================
// CAMPER QUERIES
// ============================================

/// Get every camper, oldest first.
pub async fn list_campers(db: &Database) -> Result<Vec<CamperRecord>, DatabaseError> {
    debug!("Fetching all campers");

    match db {
        Database::Postgres(pool) => {
            let client = pg_client(pool).await?;
            let rows = client.query(
                "SELECT id, name, age, created_at, updated_at FROM campers ORDER BY id",
                &[],
            ).await?;
            rows.iter().map(pg_row_to_camper).collect()
        }
        Database::Sqlite(conn) => {
            let conn = conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, name, age, created_at, updated_at FROM campers ORDER BY id",
            )?;
            let campers = stmt
                .query_map([], sqlite_row_to_camper)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(campers)
        }
    }
}

/// Get a camper by id.
pub async fn get_camper(db: &Database, id: i32) -> Result<Option<CamperRecord>, DatabaseError> {
    debug!("Fetching camper {}", id);

    match db {
        Database::Postgres(pool) => {
            let client = pg_client(pool).await?;
            let row = client.query_opt(
                "SELECT id, name, age, created_at, updated_at FROM campers WHERE id = $1",
                &[&id],
            ).await?;
            row.as_ref().map(pg_row_to_camper).transpose()
        }
        Database::Sqlite(conn) => {
            let conn = conn.lock().await;
            let camper = conn.query_row(
                "SELECT id, name, age, created_at, updated_at FROM campers WHERE id = ?1",
                params![id],
                sqlite_row_to_camper,
            ).optional()?;
            Ok(camper)
        }
    }
}

/// Insert a camper and return the stored row.
///
/// The statement runs in autocommit mode, so the row is durable once
/// this returns.
pub async fn insert_camper(db: &Database, camper: &NewCamper) -> Result<CamperRecord, DatabaseError> {
    debug!("Inserting camper {}", camper.name());

    let record = match db {
        Database::Postgres(pool) => {
            let client = pg_client(pool).await?;
            let row = client.query_one(
                r#"
                INSERT INTO campers (name, age)
                VALUES ($1, $2)
                RETURNING id, name, age, created_at, updated_at
                "#,
                &[&camper.name(), &camper.age()],
            ).await?;
            pg_row_to_camper(&row)?
        }
        Database::Sqlite(conn) => {
            let conn = conn.lock().await;
            conn.execute(
                "INSERT INTO campers (name, age) VALUES (?1, ?2)",
                params![camper.name(), camper.age()],
            )?;
            conn.query_row(
                "SELECT id, name, age, created_at, updated_at FROM campers WHERE id = ?1",
                params![conn.last_insert_rowid()],
                sqlite_row_to_camper,
            )?
        }
    };

    info!("Camper {} created with id {}", record.name, record.id);
    Ok(record)
}

/// Activities a camper has signed up for, one entry per signup.
pub async fn activities_for_camper(
    db: &Database,
    camper_id: i32,
) -> Result<Vec<ActivityRecord>, DatabaseError> {
    debug!("Fetching activities for camper {}", camper_id);

    match db {
        Database::Postgres(pool) => {
            let client = pg_client(pool).await?;
            let rows = client.query(
                r#"
                SELECT a.id, a.name, a.difficulty, a.created_at, a.updated_at
                FROM signups s
                JOIN activities a ON a.id = s.activity_id
                WHERE s.camper_id = $1
                ORDER BY s.id
                "#,
                &[&camper_id],
            ).await?;
            rows.iter().map(pg_row_to_activity).collect()
        }
        Database::Sqlite(conn) => {
            let conn = conn.lock().await;
            let mut stmt = conn.prepare(
                r#"
                SELECT a.id, a.name, a.difficulty, a.created_at, a.updated_at
                FROM signups s
                JOIN activities a ON a.id = s.activity_id
                WHERE s.camper_id = ?1
                ORDER BY s.id
                "#,
            )?;
            let activities = stmt
                .query_map(params![camper_id], sqlite_row_to_activity)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(activities)
        }
    }
}

// ============================================
// ACTIVITY QUERIES
// ============================================

/// Get every activity, oldest first.
pub async fn list_activities(db: &Database) -> Result<Vec<ActivityRecord>, DatabaseError> {
    debug!("Fetching all activities");

    match db {
        Database::Postgres(pool) => {
            let client = pg_client(pool).await?;
            let rows = client.query(
                "SELECT id, name, difficulty, created_at, updated_at FROM activities ORDER BY id",
                &[],
            ).await?;
            rows.iter().map(pg_row_to_activity).collect()
        }
        Database::Sqlite(conn) => {
            let conn = conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, name, difficulty, created_at, updated_at FROM activities ORDER BY id",
            )?;
            let activities = stmt
                .query_map([], sqlite_row_to_activity)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(activities)
        }
    }
}

/// Get an activity by id.
pub async fn get_activity(db: &Database, id: i32) -> Result<Option<ActivityRecord>, DatabaseError> {
    debug!("Fetching activity {}", id);

    match db {
        Database::Postgres(pool) => {
            let client = pg_client(pool).await?;
            let row = client.query_opt(
                "SELECT id, name, difficulty, created_at, updated_at FROM activities WHERE id = $1",
                &[&id],
            ).await?;
            row.as_ref().map(pg_row_to_activity).transpose()
        }
        Database::Sqlite(conn) => {
            let conn = conn.lock().await;
            let activity = conn.query_row(
                "SELECT id, name, difficulty, created_at, updated_at FROM activities WHERE id = ?1",
                params![id],
                sqlite_row_to_activity,
            ).optional()?;
            Ok(activity)
        }
    }
}

/// Insert an activity and return the stored row.
pub async fn insert_activity(
    db: &Database,
    activity: &NewActivity,
) -> Result<ActivityRecord, DatabaseError> {
    debug!("Inserting activity {}", activity.name);

    match db {
        Database::Postgres(pool) => {
            let client = pg_client(pool).await?;
            let row = client.query_one(
                r#"
                INSERT INTO activities (name, difficulty)
                VALUES ($1, $2)
                RETURNING id, name, difficulty, created_at, updated_at
                "#,
                &[&activity.name, &activity.difficulty],
            ).await?;
            pg_row_to_activity(&row)
        }
        Database::Sqlite(conn) => {
            let conn = conn.lock().await;
            conn.execute(
                "INSERT INTO activities (name, difficulty) VALUES (?1, ?2)",
                params![activity.name, activity.difficulty],
            )?;
            let record = conn.query_row(
                "SELECT id, name, difficulty, created_at, updated_at FROM activities WHERE id = ?1",
                params![conn.last_insert_rowid()],
                sqlite_row_to_activity,
            )?;
            Ok(record)
        }
    }
}

/// Number of rows in `activities`.
pub async fn count_activities(db: &Database) -> Result<i64, DatabaseError> {
    match db {
        Database::Postgres(pool) => {
            let client = pg_client(pool).await?;
            let row = client.query_one("SELECT COUNT(*) FROM activities", &[]).await?;
            Ok(row.try_get(0)?)
        }
        Database::Sqlite(conn) => {
            let conn = conn.lock().await;
            Ok(conn.query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?)
        }
    }
}

/// Campers signed up for an activity, one entry per signup.
pub async fn campers_for_activity(
    db: &Database,
    activity_id: i32,
) -> Result<Vec<CamperRecord>, DatabaseError> {
    debug!("Fetching campers for activity {}", activity_id);

    match db {
        Database::Postgres(pool) => {
            let client = pg_client(pool).await?;
            let rows = client.query(
                r#"
                SELECT c.id, c.name, c.age, c.created_at, c.updated_at
                FROM signups s
                JOIN campers c ON c.id = s.camper_id
                WHERE s.activity_id = $1
                ORDER BY s.id
                "#,
                &[&activity_id],
            ).await?;
            rows.iter().map(pg_row_to_camper).collect()
        }
        Database::Sqlite(conn) => {
            let conn = conn.lock().await;
            let mut stmt = conn.prepare(
                r#"
                SELECT c.id, c.name, c.age, c.created_at, c.updated_at
                FROM signups s
                JOIN campers c ON c.id = s.camper_id
                WHERE s.activity_id = ?1
                ORDER BY s.id
                "#,
            )?;
            let campers = stmt
                .query_map(params![activity_id], sqlite_row_to_camper)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(campers)
        }
    }
}

/// Delete an activity together with its signups.
///
/// Both deletes run in one transaction. Returns `false` when no activity
/// has the given id.
pub async fn delete_activity(db: &Database, id: i32) -> Result<bool, DatabaseError> {
    debug!("Deleting activity {}", id);

    let (signups_removed, activities_removed) = match db {
        Database::Postgres(pool) => {
            let mut client = pg_client(pool).await?;
            let tx = client.transaction().await?;
            let signups = tx.execute("DELETE FROM signups WHERE activity_id = $1", &[&id]).await?;
            let activities = tx.execute("DELETE FROM activities WHERE id = $1", &[&id]).await?;
            tx.commit().await?;
            (signups as usize, activities as usize)
        }
        Database::Sqlite(conn) => {
            let mut conn = conn.lock().await;
            let tx = conn.transaction()?;
            let signups = tx.execute("DELETE FROM signups WHERE activity_id = ?1", params![id])?;
            let activities = tx.execute("DELETE FROM activities WHERE id = ?1", params![id])?;
            tx.commit()?;
            (signups, activities)
        }
    };

    if activities_removed > 0 {
        info!("Activity {} deleted along with {} signup(s)", id, signups_removed);
    }
    Ok(activities_removed > 0)
}

// ============================================
// SIGNUP QUERIES
// ============================================

/// Insert a signup and read back the activity it points at.
///
/// Runs in one transaction: if the insert trips a foreign key or the
/// activity cannot be read back, nothing is written.
pub async fn create_signup(
    db: &Database,
    signup: &NewSignup,
) -> Result<(SignupRecord, ActivityRecord), DatabaseError> {
    debug!(
        "Inserting signup: camper {} -> activity {} at {}:00",
        signup.camper_id(),
        signup.activity_id(),
        signup.time()
    );

    let (record, activity) = match db {
        Database::Postgres(pool) => {
            let mut client = pg_client(pool).await?;
            let tx = client.transaction().await?;

            let row = tx.query_one(
                r#"
                INSERT INTO signups (time, activity_id, camper_id)
                VALUES ($1, $2, $3)
                RETURNING id, time, activity_id, camper_id, created_at, updated_at
                "#,
                &[&signup.time(), &signup.activity_id(), &signup.camper_id()],
            ).await?;
            let record = pg_row_to_signup(&row)?;

            let activity = tx.query_opt(
                "SELECT id, name, difficulty, created_at, updated_at FROM activities WHERE id = $1",
                &[&record.activity_id],
            ).await?;
            let activity = match activity {
                Some(row) => pg_row_to_activity(&row)?,
                None => return Err(missing_activity(record.activity_id)),
            };

            tx.commit().await?;
            (record, activity)
        }
        Database::Sqlite(conn) => {
            let mut conn = conn.lock().await;
            let tx = conn.transaction()?;

            // Plain execute so a foreign key failure surfaces here
            tx.execute(
                "INSERT INTO signups (time, activity_id, camper_id) VALUES (?1, ?2, ?3)",
                params![signup.time(), signup.activity_id(), signup.camper_id()],
            )?;
            let record = tx.query_row(
                r#"
                SELECT id, time, activity_id, camper_id, created_at, updated_at
                FROM signups WHERE id = ?1
                "#,
                params![tx.last_insert_rowid()],
                sqlite_row_to_signup,
            )?;

            let activity = tx.query_row(
                "SELECT id, name, difficulty, created_at, updated_at FROM activities WHERE id = ?1",
                params![record.activity_id],
                sqlite_row_to_activity,
            ).optional()?;
            let activity = activity.ok_or_else(|| missing_activity(record.activity_id))?;

            tx.commit()?;
            (record, activity)
        }
    };

    info!(
        "Signup {} created: camper {} -> activity {}",
        record.id, record.camper_id, record.activity_id
    );
    Ok((record, activity))
}

fn missing_activity(id: i32) -> DatabaseError {
    DatabaseError::IntegrityError(format!("signup references missing activity {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_db() -> Database {
        let db = Database::connect("sqlite::memory:", 1).await.unwrap();
        db.run_migrations().await.unwrap();
        db
    }

    async fn add_activity(db: &Database, name: &str, difficulty: i32) -> ActivityRecord {
        let activity = NewActivity {
            name: name.to_string(),
            difficulty,
        };
        insert_activity(db, &activity).await.unwrap()
    }

    #[actix_rt::test]
    async fn test_insert_and_get_camper() {
        let db = memory_db().await;
        let camper = NewCamper::new("Alex", 12).unwrap();

        let created = insert_camper(&db, &camper).await.unwrap();
        assert_eq!(created.name, "Alex");
        assert_eq!(created.age, 12);

        let fetched = get_camper(&db, created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(get_camper(&db, created.id + 1).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_signup_links_both_views() {
        let db = memory_db().await;
        let archery = add_activity(&db, "Archery", 2).await;
        let canoe = add_activity(&db, "Canoeing", 4).await;
        let camper = insert_camper(&db, &NewCamper::new("Sam", 10).unwrap()).await.unwrap();

        let (signup, activity) = create_signup(&db, &NewSignup::new(9, camper.id, canoe.id).unwrap())
            .await
            .unwrap();
        assert_eq!(signup.time, 9);
        assert_eq!(activity.id, canoe.id);

        let activities = activities_for_camper(&db, camper.id).await.unwrap();
        assert_eq!(activities.iter().map(|a| a.id).collect::<Vec<_>>(), vec![canoe.id]);

        let campers = campers_for_activity(&db, canoe.id).await.unwrap();
        assert_eq!(campers.iter().map(|c| c.id).collect::<Vec<_>>(), vec![camper.id]);
        assert!(campers_for_activity(&db, archery.id).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_signup_with_dangling_reference_is_rejected() {
        let db = memory_db().await;
        let camper = insert_camper(&db, &NewCamper::new("Sam", 10).unwrap()).await.unwrap();

        let result = create_signup(&db, &NewSignup::new(9, camper.id, 404).unwrap()).await;
        assert!(result.is_err());
        assert!(activities_for_camper(&db, camper.id).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_delete_activity_cascades() {
        let db = memory_db().await;
        let archery = add_activity(&db, "Archery", 2).await;
        let camper = insert_camper(&db, &NewCamper::new("Sam", 10).unwrap()).await.unwrap();
        create_signup(&db, &NewSignup::new(14, camper.id, archery.id).unwrap())
            .await
            .unwrap();

        assert!(delete_activity(&db, archery.id).await.unwrap());
        assert!(get_activity(&db, archery.id).await.unwrap().is_none());
        assert!(activities_for_camper(&db, camper.id).await.unwrap().is_empty());

        // Second delete finds nothing
        assert!(!delete_activity(&db, archery.id).await.unwrap());
        assert_eq!(count_activities(&db).await.unwrap(), 0);
    }
}
