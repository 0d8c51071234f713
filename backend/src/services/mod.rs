//! # Services Module
//!
//! Business logic between the HTTP handlers and the database.
//!
//! ## Services Overview
//!
//! | Service | Responsibility |
//! |---------|---------------|
//! | `CampManager` | Validate input, run queries, build projections |
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        SERVICES LAYER                            │
//! │                                                                  │
//! │  ┌──────────────────────────────────────────────────────────┐   │
//! │  │                    CampManager                            │   │
//! │  │  • list_campers()     • create_camper()   • get_camper()  │   │
//! │  │  • list_activities()  • get_activity()                    │   │
//! │  │  • delete_activity()  • create_signup()                   │   │
//! │  └──────────────────────────────────────────────────────────┘   │
//! │                              │                                   │
//! │                              ▼                                   │
//! │                     db::queries (Database)                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod camp_manager;

pub use camp_manager::{CampError, CampManager};
