pub mod announcements_service;
pub mod auth_service;
pub mod bookings_service;
pub mod context;
pub mod portfolio_service;
pub mod posts_service;
pub mod profiles_service;
pub mod projects_service;
pub mod publications_service;
pub mod resources_service;
pub mod stats_service;
pub mod users_service;

pub use announcements_service::AnnouncementsService;
pub use auth_service::AuthService;
pub use bookings_service::BookingsService;
pub use posts_service::PostsService;
pub use profiles_service::ProfilesService;
pub use projects_service::ProjectsService;
pub use publications_service::PublicationsService;
pub use resources_service::ResourcesService;
pub use stats_service::StatsService;
pub use users_service::UsersService;
