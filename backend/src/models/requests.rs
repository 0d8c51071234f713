//! # API Request Models
//!
//! Structures for incoming API request bodies.
//! Each struct represents the expected JSON body for an endpoint.
//! Missing or mistyped fields fail deserialization, which the JSON
//! extractor turns into the generic validation error.

use serde::{Deserialize, Serialize};

/// Request to register a camper.
///
/// ## Example JSON
///
/// ```json
/// {
///     "name": "Alex",
///     "age": 12
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCamperRequest {
    /// Must be non-empty.
    pub name: String,

    /// Must be between 8 and 18 inclusive.
    pub age: i32,
}

/// Request to sign a camper up for an activity.
///
/// ## Example JSON
///
/// ```json
/// {
///     "time": 9,
///     "camper_id": 1,
///     "activity_id": 3
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSignupRequest {
    /// Hour of day, 0-23.
    pub time: i32,
    pub camper_id: i32,
    pub activity_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_uses_snake_case() {
        let req: CreateSignupRequest =
            serde_json::from_str(r#"{"time": 9, "camper_id": 1, "activity_id": 3}"#).unwrap();
        assert_eq!((req.time, req.camper_id, req.activity_id), (9, 1, 3));
    }

    #[test]
    fn test_camper_request_requires_both_fields() {
        assert!(serde_json::from_str::<CreateCamperRequest>(r#"{"name": "Alex"}"#).is_err());
        assert!(serde_json::from_str::<CreateCamperRequest>(r#"{"age": 12}"#).is_err());
        assert!(serde_json::from_str::<CreateCamperRequest>(r#"{"name": null, "age": 12}"#).is_err());
    }
}
