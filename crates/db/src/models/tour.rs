//! Tour entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use panotour_core::types::{DbId, Timestamp};

use crate::models::tour_image::TourImage;

/// A tour row from the `tours` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tour {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub project_logo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A tour with its images in display order.
#[derive(Debug, Clone, Serialize)]
pub struct TourWithImages {
    #[serde(flatten)]
    pub tour: Tour,
    #[serde(rename = "tourImages")]
    pub tour_images: Vec<TourImage>,
}

/// One row of the authoring dashboard's tour list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TourSummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub project_logo: Option<String>,
    pub image_count: i64,
    /// URL of the first image in display order.
    pub cover_image_url: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for creating a new tour. The slug is derived after insert.
#[derive(Debug, Clone)]
pub struct CreateTour {
    pub name: String,
    pub description: Option<String>,
    pub project_logo: Option<String>,
}

/// DTO for updating an existing tour. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateTour {
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_logo: Option<String>,
}
