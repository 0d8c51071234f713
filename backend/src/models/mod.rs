//! # API Models
//!
//! This module defines the request and response structures for the REST API.
//! These are separate from database models so that no stored column
//! (audit timestamps in particular) reaches a client by accident.
//!
//! ## Organization
//!
//! - `requests.rs` - Incoming request bodies
//! - `responses.rs` - Outgoing projections and the error payload
//!
//! ## Serialization
//!
//! All models use Serde for JSON serialization/deserialization.
//! Field names stay snake_case, matching the wire format clients expect
//! (`camper_id`, `activity_id`).

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
