//! Hotspot projection.
//!
//! A projected hotspot's `order` is its 1-based position in the sequence the
//! repository returned for its tour image. It is not persisted.

use serde::Serialize;

use super::aggregate::HotspotNode;
use super::references::{resolve_icon, resolve_link};
use crate::types::DbId;

/// Hotspot entry of the public viewer projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerHotspot {
    pub pitch: f64,
    pub yaw: f64,
    pub hfov: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub tour_image_id: DbId,
    pub hotspot_image_id: Option<DbId>,
    /// Name of the linked tour image.
    pub transition: Option<String>,
    pub arrow_image_url: Option<String>,
    pub order: u32,
}

/// Hotspot entry of the authoring projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendHotspot {
    pub id: DbId,
    pub linked_tour_image_id: Option<DbId>,
    #[serde(flatten)]
    pub hotspot: ViewerHotspot,
}

/// Project one hotspot for the viewer. `position` is 1-based.
pub fn project_hotspot(hotspot: &HotspotNode, position: u32) -> ViewerHotspot {
    let link = resolve_link(hotspot.linked_tour_image.as_ref());
    let icon = resolve_icon(hotspot.hotspot_image.as_ref());

    ViewerHotspot {
        pitch: hotspot.pitch,
        yaw: hotspot.yaw,
        hfov: hotspot.hfov,
        kind: hotspot.kind.clone(),
        label: hotspot.name.clone(),
        tour_image_id: hotspot.tour_image_id,
        hotspot_image_id: hotspot.hotspot_image_id,
        transition: link.map(|target| target.name),
        arrow_image_url: icon.map(|icon| icon.url),
        order: position,
    }
}

/// Project one hotspot for the authoring dashboard. `position` is 1-based.
///
/// `linked_tour_image_id` comes from the resolved target, so a dangling link
/// projects as `null` just like `transition`.
pub fn project_backend_hotspot(hotspot: &HotspotNode, position: u32) -> BackendHotspot {
    BackendHotspot {
        id: hotspot.id,
        linked_tour_image_id: resolve_link(hotspot.linked_tour_image.as_ref())
            .map(|target| target.id),
        hotspot: project_hotspot(hotspot, position),
    }
}

/// Project a tour image's hotspots in sequence, assigning orders 1..=n.
pub fn project_all<H>(hotspots: &[HotspotNode], project: impl Fn(&HotspotNode, u32) -> H) -> Vec<H> {
    hotspots
        .iter()
        .zip(1u32..)
        .map(|(hotspot, position)| project(hotspot, position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::fixtures::{arrow_icon, hotspot, linked};

    #[test]
    fn label_is_hotspot_name() {
        let projected = project_hotspot(&hotspot(100, 10, "Go to Hall"), 1);
        assert_eq!(projected.label, "Go to Hall");
        assert_eq!(projected.kind, "link");
    }

    #[test]
    fn null_link_projects_null_transition() {
        let projected = project_backend_hotspot(&hotspot(100, 10, "Info"), 1);
        assert_eq!(projected.hotspot.transition, None);
        assert_eq!(projected.linked_tour_image_id, None);
    }

    #[test]
    fn valid_link_projects_target_name() {
        let mut h = hotspot(100, 10, "Go to Hall");
        h.linked_tour_image_id = Some(20);
        h.linked_tour_image = Some(linked(20, "Hall"));

        let projected = project_backend_hotspot(&h, 1);
        assert_eq!(projected.hotspot.transition.as_deref(), Some("Hall"));
        assert_eq!(projected.linked_tour_image_id, Some(20));
    }

    #[test]
    fn dangling_link_projects_null() {
        let mut h = hotspot(100, 10, "Go to Hall");
        h.linked_tour_image_id = Some(20);

        let projected = project_backend_hotspot(&h, 1);
        assert_eq!(projected.hotspot.transition, None);
        assert_eq!(projected.linked_tour_image_id, None);
    }

    #[test]
    fn deleted_icon_projects_null_arrow_url() {
        let mut h = hotspot(100, 10, "Marker");
        h.hotspot_image_id = Some(3);

        let projected = project_hotspot(&h, 1);
        assert_eq!(projected.hotspot_image_id, Some(3));
        assert_eq!(projected.arrow_image_url, None);
    }

    #[test]
    fn icon_url_becomes_arrow_url() {
        let mut h = hotspot(100, 10, "Marker");
        h.hotspot_image_id = Some(3);
        h.hotspot_image = Some(arrow_icon(3));

        let projected = project_hotspot(&h, 1);
        assert_eq!(projected.arrow_image_url.as_deref(), Some("/uploads/arrow.png"));
    }

    #[test]
    fn orders_are_one_based_and_contiguous() {
        let hotspots = vec![
            hotspot(7, 10, "h0"),
            hotspot(3, 10, "h1"),
            hotspot(9, 10, "h2"),
        ];
        let orders: Vec<u32> = project_all(&hotspots, project_hotspot)
            .into_iter()
            .map(|h| h.order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn backend_hotspot_serializes_flat() {
        let json = serde_json::to_value(project_backend_hotspot(&hotspot(100, 10, "A"), 2)).unwrap();
        assert_eq!(json["id"], 100);
        assert_eq!(json["type"], "link");
        assert_eq!(json["order"], 2);
        assert!(json["linked_tour_image_id"].is_null());
        assert!(json.get("hotspot").is_none());
    }
}
