//! HTTP adapter for matching endpoints.
//!
//! Exposes the matching engine via REST API:
//! - `POST /api/matches` - Rank mentors for trait selections
//! - `POST /api/matches/feedback` - Record the user's pick
//! - `POST /api/advice` - Advice for the gap to one mentor
//! - `GET /api/traits` - Selectable traits
//! - `GET /api/mentors` - Current mentor pool
//! - `POST /api/mentors/refresh` - Reload the mentor pool
//! - `GET /health` - Liveness and cache status

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{MatchingApiError, MatchingAppState, MATCH_FAILED_MESSAGE};
pub use routes::{matching_router, matching_routes};
