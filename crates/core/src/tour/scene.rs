//! Scene records built from one tour image.

use serde::Serialize;

use super::aggregate::{HotspotNode, TourImageNode};
use super::hotspot::{project_all, project_backend_hotspot, BackendHotspot};
use crate::types::DbId;

/// Initial view pitch used when a tour image does not override it.
pub const DEFAULT_INIT_PITCH: f64 = -2.7342592674655826;
/// Initial view yaw used when a tour image does not override it.
pub const DEFAULT_INIT_YAW: f64 = -71.59842185194374;

/// One panorama scene with its ordered hotspots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene<H> {
    /// Tour image id. Stable even when two scenes share a name.
    pub scene_id: DbId,
    pub scene_name: String,
    pub scene_pano_img: String,
    pub init_pitch: f64,
    pub init_yaw: f64,
    pub hot_spots_arr: Vec<H>,
}

/// Authoring variant of [`Scene`], annotated with tour-level fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendScene {
    /// The tour image id (named `tourId` on the wire).
    pub tour_id: DbId,
    pub project_logo: Option<String>,
    #[serde(flatten)]
    pub scene: Scene<BackendHotspot>,
}

pub fn build_scene<H>(
    image: &TourImageNode,
    project: impl Fn(&HotspotNode, u32) -> H,
) -> Scene<H> {
    Scene {
        scene_id: image.id,
        scene_name: image.name.clone(),
        scene_pano_img: image.url.clone(),
        init_pitch: image.init_pitch.unwrap_or(DEFAULT_INIT_PITCH),
        init_yaw: image.init_yaw.unwrap_or(DEFAULT_INIT_YAW),
        hot_spots_arr: project_all(&image.hotspots, project),
    }
}

pub fn build_backend_scene(image: &TourImageNode, project_logo: Option<&str>) -> BackendScene {
    BackendScene {
        tour_id: image.id,
        project_logo: project_logo.map(str::to_owned),
        scene: build_scene(image, project_backend_hotspot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::fixtures::{hotspot, image};
    use crate::tour::hotspot::project_hotspot;

    #[test]
    fn default_view_angles_apply() {
        let scene = build_scene(&image(10, "Lobby", vec![]), project_hotspot);
        assert_eq!(scene.init_pitch, DEFAULT_INIT_PITCH);
        assert_eq!(scene.init_yaw, DEFAULT_INIT_YAW);
    }

    #[test]
    fn per_image_view_angles_override_defaults() {
        let mut lobby = image(10, "Lobby", vec![]);
        lobby.init_pitch = Some(4.5);
        lobby.init_yaw = Some(-120.0);

        let scene = build_scene(&lobby, project_hotspot);
        assert_eq!(scene.init_pitch, 4.5);
        assert_eq!(scene.init_yaw, -120.0);
    }

    #[test]
    fn scene_copies_name_and_url() {
        let scene = build_scene(&image(10, "Lobby", vec![]), project_hotspot);
        assert_eq!(scene.scene_id, 10);
        assert_eq!(scene.scene_name, "Lobby");
        assert_eq!(scene.scene_pano_img, "/u/lobby.jpg");
        assert!(scene.hot_spots_arr.is_empty());
    }

    #[test]
    fn backend_scene_carries_logo_and_image_id() {
        let lobby = image(10, "Lobby", vec![hotspot(100, 10, "A"), hotspot(101, 10, "B")]);
        let scene = build_backend_scene(&lobby, Some("/uploads/logo.png"));

        assert_eq!(scene.tour_id, 10);
        assert_eq!(scene.project_logo.as_deref(), Some("/uploads/logo.png"));
        let ids: Vec<DbId> = scene.scene.hot_spots_arr.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![100, 101]);
    }

    #[test]
    fn backend_scene_wire_names() {
        let scene = build_backend_scene(&image(10, "Lobby", vec![]), None);
        let json = serde_json::to_value(&scene).unwrap();

        assert_eq!(json["tourId"], 10);
        assert!(json["projectLogo"].is_null());
        assert_eq!(json["sceneName"], "Lobby");
        assert_eq!(json["scenePanoImg"], "/u/lobby.jpg");
        assert!(json["hotSpotsArr"].is_array());
    }
}
