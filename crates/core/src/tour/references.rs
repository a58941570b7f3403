//! Resolution of a hotspot's optional foreign references.
//!
//! Both functions are total: an absent reference resolves to `None` and never
//! fails the surrounding assembly.

use super::aggregate::{HotspotIcon, LinkedTourImage};
use crate::types::DbId;

/// Display values of a navigation target.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTarget {
    pub id: DbId,
    pub name: String,
}

/// Display values of a marker icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconRef {
    pub id: DbId,
    pub url: String,
}

pub fn resolve_link(linked: Option<&LinkedTourImage>) -> Option<LinkTarget> {
    linked.map(|image| LinkTarget {
        id: image.id,
        name: image.name.clone(),
    })
}

pub fn resolve_icon(icon: Option<&HotspotIcon>) -> Option<IconRef> {
    icon.map(|icon| IconRef {
        id: icon.id,
        url: icon.url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_link_resolves_to_none() {
        assert_eq!(resolve_link(None), None);
    }

    #[test]
    fn present_link_keeps_id_and_name() {
        let hall = LinkedTourImage {
            id: 20,
            name: "Hall".into(),
            url: "/u/hall.jpg".into(),
        };
        assert_eq!(
            resolve_link(Some(&hall)),
            Some(LinkTarget {
                id: 20,
                name: "Hall".into()
            })
        );
    }

    #[test]
    fn absent_icon_resolves_to_none() {
        assert_eq!(resolve_icon(None), None);
    }

    #[test]
    fn present_icon_keeps_url() {
        let arrow = HotspotIcon {
            id: 3,
            url: "/uploads/arrow.png".into(),
            name: "Arrow".into(),
        };
        let resolved = resolve_icon(Some(&arrow)).unwrap();
        assert_eq!(resolved.id, 3);
        assert_eq!(resolved.url, "/uploads/arrow.png");
    }
}
