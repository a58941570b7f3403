//! In-memory tour aggregate as handed over by the repository layer.

use crate::types::DbId;

/// A tour with all of its panorama images, eagerly loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TourAggregate {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub project_logo: Option<String>,
    /// Display order as returned by the repository.
    pub tour_images: Vec<TourImageNode>,
}

/// One panorama image of a tour, with the hotspots placed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct TourImageNode {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub sort_order: i32,
    /// Per-image override of the initial view pitch.
    pub init_pitch: Option<f64>,
    /// Per-image override of the initial view yaw.
    pub init_yaw: Option<f64>,
    pub hotspots: Vec<HotspotNode>,
}

/// A hotspot row plus its eagerly-resolved optional references.
///
/// `linked_tour_image` / `hotspot_image` are `None` both when the id column is
/// null and when the referenced row no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotNode {
    pub id: DbId,
    pub pitch: f64,
    pub yaw: f64,
    pub hfov: f64,
    pub kind: String,
    pub name: String,
    pub tour_image_id: DbId,
    pub hotspot_image_id: Option<DbId>,
    pub linked_tour_image_id: Option<DbId>,
    pub linked_tour_image: Option<LinkedTourImage>,
    pub hotspot_image: Option<HotspotIcon>,
}

/// The tour image a navigational hotspot points at.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedTourImage {
    pub id: DbId,
    pub name: String,
    pub url: String,
}

/// A reusable hotspot marker icon.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotIcon {
    pub id: DbId,
    pub url: String,
    pub name: String,
}
