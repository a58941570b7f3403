//! Aggregate builders shared by the tour module's tests.

use super::aggregate::{HotspotIcon, HotspotNode, LinkedTourImage, TourAggregate, TourImageNode};
use crate::types::DbId;

pub fn tour(id: DbId, name: &str, images: Vec<TourImageNode>) -> TourAggregate {
    TourAggregate {
        id,
        name: name.to_string(),
        slug: format!("{}-{id}", name.to_lowercase()),
        description: None,
        project_logo: Some("/uploads/logo.png".to_string()),
        tour_images: images,
    }
}

pub fn image(id: DbId, name: &str, hotspots: Vec<HotspotNode>) -> TourImageNode {
    TourImageNode {
        id,
        name: name.to_string(),
        url: format!("/u/{}.jpg", name.to_lowercase()),
        sort_order: 0,
        init_pitch: None,
        init_yaw: None,
        hotspots,
    }
}

pub fn hotspot(id: DbId, tour_image_id: DbId, name: &str) -> HotspotNode {
    HotspotNode {
        id,
        pitch: -5.0,
        yaw: 20.0,
        hfov: 90.0,
        kind: "link".to_string(),
        name: name.to_string(),
        tour_image_id,
        hotspot_image_id: None,
        linked_tour_image_id: None,
        linked_tour_image: None,
        hotspot_image: None,
    }
}

pub fn linked(id: DbId, name: &str) -> LinkedTourImage {
    LinkedTourImage {
        id,
        name: name.to_string(),
        url: format!("/u/{}.jpg", name.to_lowercase()),
    }
}

pub fn arrow_icon(id: DbId) -> HotspotIcon {
    HotspotIcon {
        id,
        url: "/uploads/arrow.png".to_string(),
        name: "Arrow".to_string(),
    }
}
