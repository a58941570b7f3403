//! Tour image (panorama scene) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use panotour_core::types::{DbId, Timestamp};

use crate::models::present;

/// A row from the `tour_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TourImage {
    pub id: DbId,
    pub tour_id: DbId,
    pub name: String,
    pub url: String,
    pub sort_order: i32,
    pub init_pitch: Option<f64>,
    pub init_yaw: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a tour image after its file has been stored.
#[derive(Debug, Clone)]
pub struct CreateTourImage {
    pub name: String,
    pub url: String,
    pub sort_order: i32,
}

/// DTO for editing a tour image's scene metadata.
///
/// An explicit `null` for an initial angle drops the override so the viewer
/// falls back to the default view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTourImage {
    pub name: Option<String>,
    pub sort_order: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub init_pitch: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub init_yaw: Option<Option<f64>>,
}
