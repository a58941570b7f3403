//! Repository layer: one zero-sized struct per table with async CRUD
//! functions taking a `&PgPool`.

pub mod hotspot_image_repo;
pub mod hotspot_repo;
pub mod tour_image_repo;
pub mod tour_repo;
pub mod user_repo;

pub use hotspot_image_repo::HotspotImageRepo;
pub use hotspot_repo::HotspotRepo;
pub use tour_image_repo::TourImageRepo;
pub use tour_repo::{TourRepo, TourUpdateError};
pub use user_repo::UserRepo;
