//! Business logic services.
//!
//! Services orchestrate the storage seam, the triage pipeline, and the
//! external collaborators, and provide the high-level operations the
//! surrounding application calls.

mod analytics;
mod appeal;
mod geolocation;

pub use analytics::{AnalyticsService, DashboardStats, DistrictCount, TimelinePoint};
pub use appeal::AppealService;
pub use geolocation::{Geocoder, distance_km};
