//! Orthogonal connector routing between annotations on different documents.

pub mod anchors;
pub mod corners;
pub mod engine;
pub mod lanes;
pub mod search;
pub mod types;

pub use engine::RoutingEngine;
pub use lanes::resolve_overlaps;
pub use types::{Connection, ConnectionResult, RouteError, RouteReport};
