//! Domain model structs and DTOs.
//!
//! Each submodule has a `FromRow` entity struct matching the database row
//! plus the create and update DTOs the repositories take. Update DTOs use
//! `Option` fields for partial patches.

pub mod hotspot;
pub mod hotspot_image;
pub mod tour;
pub mod tour_image;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that may be explicitly `null`, so that
/// `Option<Option<T>>` tells an absent key (`None`) apart from a clear
/// (`Some(None)`). Use together with `#[serde(default)]`.
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
