//! Domain logic for the panorama tour backend.
//!
//! Nothing in this crate touches the database or the network; the repository
//! and HTTP layers pass data in and take results out.

pub mod error;
pub mod hotspot_validation;
pub mod image_sync;
pub mod password_reset;
pub mod slug;
pub mod tour;
pub mod types;
pub mod upload;
