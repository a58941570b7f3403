//! Hotspot icon asset model.

use serde::Serialize;
use sqlx::FromRow;
use panotour_core::types::DbId;

/// A row from the `hotspot_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HotspotImage {
    pub id: DbId,
    pub url: String,
    pub name: String,
}

/// DTO for registering an icon asset.
#[derive(Debug, Clone)]
pub struct CreateHotspotImage {
    pub url: String,
    pub name: String,
}
