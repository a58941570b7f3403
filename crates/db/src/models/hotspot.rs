//! Hotspot entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use panotour_core::types::{DbId, Timestamp};

use crate::models::hotspot_image::HotspotImage;
use crate::models::present;

/// A row from the `hotspots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hotspot {
    pub id: DbId,
    pub tour_image_id: DbId,
    pub linked_tour_image_id: Option<DbId>,
    pub hotspot_image_id: Option<DbId>,
    pub pitch: f64,
    pub yaw: f64,
    pub hfov: f64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Hotspot row joined with the image it sits on, its link target and its icon.
///
/// `linked_*` / `icon_*` columns are null when the reference is null or the
/// referenced row is gone.
#[derive(Debug, Clone, FromRow)]
pub struct HotspotJoinRow {
    #[sqlx(flatten)]
    pub hotspot: Hotspot,
    pub tour_image_url: String,
    pub tour_image_name: String,
    pub linked_id: Option<DbId>,
    pub linked_url: Option<String>,
    pub linked_name: Option<String>,
    pub icon_id: Option<DbId>,
    pub icon_url: Option<String>,
    pub icon_name: Option<String>,
}

/// Compact tour image reference nested in [`HotspotWithRefs`].
#[derive(Debug, Clone, Serialize)]
pub struct ImageRef {
    pub id: DbId,
    pub url: String,
    pub name: String,
}

/// A hotspot with its references expanded, as listed per tour image.
#[derive(Debug, Clone, Serialize)]
pub struct HotspotWithRefs {
    #[serde(flatten)]
    pub hotspot: Hotspot,
    #[serde(rename = "tourImage")]
    pub tour_image: ImageRef,
    #[serde(rename = "linkedTourImage")]
    pub linked_tour_image: Option<ImageRef>,
    #[serde(rename = "hotspotImage")]
    pub hotspot_image: Option<HotspotImage>,
}

impl HotspotJoinRow {
    pub fn linked_ref(&self) -> Option<ImageRef> {
        Some(ImageRef {
            id: self.linked_id?,
            url: self.linked_url.clone()?,
            name: self.linked_name.clone()?,
        })
    }

    pub fn icon(&self) -> Option<HotspotImage> {
        Some(HotspotImage {
            id: self.icon_id?,
            url: self.icon_url.clone()?,
            name: self.icon_name.clone()?,
        })
    }

    pub fn into_with_refs(self) -> HotspotWithRefs {
        let linked_tour_image = self.linked_ref();
        let hotspot_image = self.icon();
        HotspotWithRefs {
            tour_image: ImageRef {
                id: self.hotspot.tour_image_id,
                url: self.tour_image_url,
                name: self.tour_image_name,
            },
            hotspot: self.hotspot,
            linked_tour_image,
            hotspot_image,
        }
    }
}

/// DTO for creating a new hotspot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHotspot {
    pub pitch: f64,
    pub yaw: f64,
    pub hfov: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub tour_image_id: DbId,
    pub hotspot_image_id: Option<DbId>,
    pub linked_tour_image_id: Option<DbId>,
}

/// DTO for a partial hotspot update.
///
/// For the two optional references an absent field leaves the value alone
/// while an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHotspot {
    pub pitch: Option<f64>,
    pub yaw: Option<f64>,
    pub hfov: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub tour_image_id: Option<DbId>,
    #[serde(default, deserialize_with = "present")]
    pub hotspot_image_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "present")]
    pub linked_tour_image_id: Option<Option<DbId>>,
}

impl UpdateHotspot {
    /// Apply the patch on top of the stored row.
    pub fn merge_into(&self, current: &Hotspot) -> CreateHotspot {
        CreateHotspot {
            pitch: self.pitch.unwrap_or(current.pitch),
            yaw: self.yaw.unwrap_or(current.yaw),
            hfov: self.hfov.unwrap_or(current.hfov),
            kind: self.kind.clone().unwrap_or_else(|| current.kind.clone()),
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            tour_image_id: self.tour_image_id.unwrap_or(current.tour_image_id),
            hotspot_image_id: self.hotspot_image_id.unwrap_or(current.hotspot_image_id),
            linked_tour_image_id: self
                .linked_tour_image_id
                .unwrap_or(current.linked_tour_image_id),
        }
    }
}
