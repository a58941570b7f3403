//! Field validation for hotspots.
//!
//! Checks that need the database (referenced images exist) are done by the
//! handler layer; everything here is pure.

use crate::error::CoreError;
use crate::types::DbId;

pub const HOTSPOT_TYPE_LINK: &str = "link";
pub const HOTSPOT_TYPE_INFO: &str = "info";
pub const VALID_HOTSPOT_TYPES: &[&str] = &[HOTSPOT_TYPE_LINK, HOTSPOT_TYPE_INFO];

/// The validated subset of a hotspot, after merging any partial update.
#[derive(Debug, Clone, Copy)]
pub struct HotspotFields<'a> {
    pub pitch: f64,
    pub yaw: f64,
    pub hfov: f64,
    pub kind: &'a str,
    pub name: &'a str,
    pub tour_image_id: DbId,
    pub linked_tour_image_id: Option<DbId>,
}

pub fn validate_hotspot(fields: &HotspotFields<'_>) -> Result<(), CoreError> {
    if !VALID_HOTSPOT_TYPES.contains(&fields.kind) {
        return Err(CoreError::Validation(format!(
            "Invalid hotspot type '{}'. Must be one of: {}",
            fields.kind,
            VALID_HOTSPOT_TYPES.join(", ")
        )));
    }
    if fields.name.trim().is_empty() {
        return Err(CoreError::Validation("Hotspot name is required".into()));
    }
    if !(-90.0..=90.0).contains(&fields.pitch) {
        return Err(CoreError::Validation(format!(
            "pitch must be between -90 and 90, got {}",
            fields.pitch
        )));
    }
    if !(-360.0..=360.0).contains(&fields.yaw) {
        return Err(CoreError::Validation(format!(
            "yaw must be between -360 and 360, got {}",
            fields.yaw
        )));
    }
    if !(fields.hfov > 0.0 && fields.hfov <= 360.0) {
        return Err(CoreError::Validation(format!(
            "hfov must be greater than 0 and at most 360, got {}",
            fields.hfov
        )));
    }
    if fields.linked_tour_image_id == Some(fields.tour_image_id) {
        return Err(CoreError::Validation(
            "A hotspot cannot link to the image it is placed on".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn valid() -> HotspotFields<'static> {
        HotspotFields {
            pitch: -5.0,
            yaw: 20.0,
            hfov: 90.0,
            kind: HOTSPOT_TYPE_LINK,
            name: "Go to Hall",
            tour_image_id: 10,
            linked_tour_image_id: Some(20),
        }
    }

    #[test]
    fn accepts_valid_link() {
        assert!(validate_hotspot(&valid()).is_ok());
    }

    #[test]
    fn accepts_info_without_link() {
        let fields = HotspotFields {
            kind: HOTSPOT_TYPE_INFO,
            linked_tour_image_id: None,
            ..valid()
        };
        assert!(validate_hotspot(&fields).is_ok());
    }

    #[test]
    fn rejects_unknown_type() {
        let fields = HotspotFields { kind: "scene", ..valid() };
        assert_matches!(validate_hotspot(&fields), Err(CoreError::Validation(msg)) if msg.contains("scene"));
    }

    #[test]
    fn rejects_blank_name() {
        let fields = HotspotFields { name: "  ", ..valid() };
        assert!(validate_hotspot(&fields).is_err());
    }

    #[test]
    fn rejects_pitch_out_of_range() {
        let fields = HotspotFields { pitch: 91.0, ..valid() };
        assert!(validate_hotspot(&fields).is_err());
    }

    #[test]
    fn rejects_yaw_out_of_range() {
        let fields = HotspotFields { yaw: -361.0, ..valid() };
        assert!(validate_hotspot(&fields).is_err());
    }

    #[test]
    fn rejects_zero_hfov() {
        let fields = HotspotFields { hfov: 0.0, ..valid() };
        assert!(validate_hotspot(&fields).is_err());
    }

    #[test]
    fn rejects_nan_hfov() {
        let fields = HotspotFields { hfov: f64::NAN, ..valid() };
        assert!(validate_hotspot(&fields).is_err());
    }

    #[test]
    fn rejects_self_link() {
        let fields = HotspotFields {
            linked_tour_image_id: Some(10),
            ..valid()
        };
        assert_matches!(validate_hotspot(&fields), Err(CoreError::Validation(_)));
    }
}
