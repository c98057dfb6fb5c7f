use serde::Serialize;

/// Counters shown on the admin dashboard.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct DashboardStats {
    pub users: i64,
    pub publications: i64,
    pub projects: i64,
    pub published_posts: i64,
    pub draft_posts: i64,
    pub active_resources: i64,
    pub pending_bookings: i64,
    pub upcoming_bookings: i64,
}

#[derive(Serialize, Debug)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: bool,
    pub redis: bool,
}
