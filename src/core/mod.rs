//! Core application primitives: snapshot computation, refresh engine,
//! HTTP surface and background scheduling.

pub mod http;
pub mod refresh;
pub mod scheduler;
pub mod snapshot;

pub use http::{create_router, start_server, AppState, HealthStatus};
pub use refresh::{CycleReport, DashboardData, RefreshEngine, RefreshError};
pub use scheduler::RefreshScheduler;
pub use snapshot::compute_snapshot;
