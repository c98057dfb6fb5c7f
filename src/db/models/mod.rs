// Sub-modules organized by functional domain
pub mod announcement;
pub mod api;
pub mod auth;
pub mod booking;
pub mod portfolio;
pub mod post;
pub mod profile;
pub mod project;
pub mod publication;
pub mod resource;
pub mod stats;

pub use announcement::*;
pub use api::*;
pub use auth::*;
pub use booking::*;
pub use portfolio::*;
pub use post::*;
pub use profile::*;
pub use project::*;
pub use publication::*;
pub use resource::*;
pub use stats::*;
