//! Planning of tour image updates.
//!
//! Tour updates reconcile the stored images against the list of image ids the
//! client wants to keep (upsert/diff). Kept images retain their ids, so
//! hotspots placed on them or linking to them stay valid. The plan is computed
//! here and applied by the repository layer in one transaction.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// A stored image as seen by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingImage {
    pub id: DbId,
    pub sort_order: i32,
}

/// What to do to the stored images of one tour.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageSyncPlan {
    /// Images to delete (with their hotspots).
    pub delete: Vec<DbId>,
    /// New `sort_order` for kept images.
    pub reorder: Vec<(DbId, i32)>,
    /// `sort_order` of the first newly uploaded image; later uploads follow.
    pub first_new_order: i32,
}

/// Compute the plan.
///
/// With `keep = None` the stored images are left as they are and new uploads
/// are appended after the current highest order. With `keep = Some(ids)` the
/// listed images are kept and renumbered `1..` in list order, every other image
/// of the tour is deleted, and new uploads follow the kept ones.
///
/// Unknown or repeated ids are rejected so a stale client cannot delete images
/// by accident.
pub fn plan_image_sync(
    existing: &[ExistingImage],
    keep: Option<&[DbId]>,
) -> Result<ImageSyncPlan, CoreError> {
    let Some(keep) = keep else {
        let max_order = existing.iter().map(|img| img.sort_order).max().unwrap_or(0);
        return Ok(ImageSyncPlan {
            first_new_order: max_order + 1,
            ..Default::default()
        });
    };

    let stored: HashSet<DbId> = existing.iter().map(|img| img.id).collect();
    let mut seen = HashSet::with_capacity(keep.len());
    for id in keep {
        if !stored.contains(id) {
            return Err(CoreError::Validation(format!(
                "Image {id} does not belong to this tour"
            )));
        }
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "Image {id} is listed more than once"
            )));
        }
    }

    let delete = existing
        .iter()
        .map(|img| img.id)
        .filter(|id| !seen.contains(id))
        .collect();
    let reorder = keep.iter().copied().zip(1..).collect();

    Ok(ImageSyncPlan {
        delete,
        reorder,
        first_new_order: keep.len() as i32 + 1,
    })
}

/// Parse the `image_ids` form field: a JSON array of ids, e.g. `[10, 12]`.
pub fn parse_image_ids(raw: &str) -> Result<Vec<DbId>, CoreError> {
    serde_json::from_str(raw.trim()).map_err(|e| {
        CoreError::Validation(format!("image_ids must be a JSON array of ids: {e}"))
    })
}
